//! Guild-wide enumerated settings: verification, notification, content filter, locale.
//!
//! Configuration documents spell these by name (`medium`, `only_mentions`, ...). The
//! integer values sent to and received from Discord are exposed via `api_value`.

use serde::{Deserialize, Serialize};

/// Member verification level. Variants are ordered from least to most strict.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
    Highest,
}

impl VerificationLevel {
    pub fn api_value(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Highest => 4,
        }
    }

    pub fn from_api_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            4 => Some(Self::Highest),
            _ => None,
        }
    }
}

/// Default message notification level for new members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    #[default]
    AllMessages,
    OnlyMentions,
}

impl NotificationLevel {
    pub fn api_value(self) -> u8 {
        match self {
            Self::AllMessages => 0,
            Self::OnlyMentions => 1,
        }
    }

    pub fn from_api_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::AllMessages),
            1 => Some(Self::OnlyMentions),
            _ => None,
        }
    }
}

/// Explicit media content filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentFilter {
    #[default]
    Disabled,
    NoRole,
    AllMembers,
}

impl ContentFilter {
    pub fn api_value(self) -> u8 {
        match self {
            Self::Disabled => 0,
            Self::NoRole => 1,
            Self::AllMembers => 2,
        }
    }

    pub fn from_api_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Disabled),
            1 => Some(Self::NoRole),
            2 => Some(Self::AllMembers),
            _ => None,
        }
    }
}

/// Guild preferred locale, named as in configuration documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    AmericanEnglish,
    BritishEnglish,
    Bulgarian,
    Chinese,
    TaiwanChinese,
    Croatian,
    Czech,
    Indonesian,
    Danish,
    Dutch,
    Finnish,
    French,
    German,
    Greek,
    Hindi,
    Hungarian,
    Italian,
    Japanese,
    Korean,
    LatinAmericanSpanish,
    Lithuanian,
    Norwegian,
    Polish,
    BrazilPortuguese,
    Romanian,
    Russian,
    SpainSpanish,
    Swedish,
    Thai,
    Turkish,
    Ukrainian,
    Vietnamese,
}

impl Locale {
    /// Locale code as stored by Discord, e.g. `en-US`.
    pub fn code(self) -> &'static str {
        match self {
            Self::AmericanEnglish => "en-US",
            Self::BritishEnglish => "en-GB",
            Self::Bulgarian => "bg",
            Self::Chinese => "zh-CN",
            Self::TaiwanChinese => "zh-TW",
            Self::Croatian => "hr",
            Self::Czech => "cs",
            Self::Indonesian => "id",
            Self::Danish => "da",
            Self::Dutch => "nl",
            Self::Finnish => "fi",
            Self::French => "fr",
            Self::German => "de",
            Self::Greek => "el",
            Self::Hindi => "hi",
            Self::Hungarian => "hu",
            Self::Italian => "it",
            Self::Japanese => "ja",
            Self::Korean => "ko",
            Self::LatinAmericanSpanish => "es-419",
            Self::Lithuanian => "lt",
            Self::Norwegian => "no",
            Self::Polish => "pl",
            Self::BrazilPortuguese => "pt-BR",
            Self::Romanian => "ro",
            Self::Russian => "ru",
            Self::SpainSpanish => "es-ES",
            Self::Swedish => "sv-SE",
            Self::Thai => "th",
            Self::Turkish => "tr",
            Self::Ukrainian => "uk",
            Self::Vietnamese => "vi",
        }
    }
}
