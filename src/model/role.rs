use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serenity::all::{Colour, Permissions};

use crate::model::permission::{permission_set, Permission};

/// Name of the implicit base role every guild member holds.
pub const EVERYONE: &str = "@everyone";

/// 24-bit RGB colour written as `#RRGGBB` with upper-case hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HexColor(pub u32);

impl HexColor {
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        let valid = digits.len() == 6
            && digits
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c));
        if !valid {
            return None;
        }

        u32::from_str_radix(digits, 16).ok().map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl From<HexColor> for Colour {
    fn from(color: HexColor) -> Self {
        Colour::new(color.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        HexColor::parse(&text).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&text), &"a colour like #FFD700")
        })
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Desired state of one guild role.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoleTemplate {
    pub name: String,
    pub color: HexColor,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub mentionable: bool,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl RoleTemplate {
    /// `@everyone` exists in every guild and never has its colour edited.
    pub fn is_everyone(&self) -> bool {
        self.name == EVERYONE
    }

    pub fn permission_set(&self) -> Permissions {
        permission_set(&self.permissions)
    }
}
