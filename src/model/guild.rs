//! Top-level guild configuration and its validation.
//!
//! A configuration document is parsed into [`GuildConfigDocument`], which still accepts the
//! legacy `*_channel_name` keys, and then converted into a validated [`GuildConfig`]. Only
//! a validated configuration is handed to the reconciler.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{config::ConfigError, validation::ValidationError, AppError},
    model::{
        channel::{CategoryTemplate, ChannelTemplate, PermissionOverwriteTemplate},
        level::{ContentFilter, Locale, NotificationLevel, VerificationLevel},
        role::RoleTemplate,
    },
};

fn enabled() -> bool {
    true
}

/// The channel receiving system messages and which of those messages are sent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SystemChannel {
    pub name: String,
    #[serde(default = "enabled")]
    pub join_notifications: bool,
    #[serde(default = "enabled")]
    pub join_notification_replies: bool,
    #[serde(default = "enabled")]
    pub guild_reminder_notifications: bool,
    #[serde(default = "enabled")]
    pub premium_subscriptions: bool,
    #[serde(default = "enabled")]
    pub role_subscription_purchase_notifications: bool,
    #[serde(default = "enabled")]
    pub role_subscription_purchase_notification_replies: bool,
}

impl SystemChannel {
    /// System channel with every notification enabled.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            join_notifications: true,
            join_notification_replies: true,
            guild_reminder_notifications: true,
            premium_subscriptions: true,
            role_subscription_purchase_notifications: true,
            role_subscription_purchase_notification_replies: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommunityFeatures {
    pub guild_description: String,
    pub rules_channel: String,
    pub public_updates_channel: String,
    pub safety_alerts_channel: String,
}

/// Configuration document as written on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuildConfigDocument {
    pub roles: Vec<RoleTemplate>,
    #[serde(default)]
    pub system_channel: Option<SystemChannel>,
    #[serde(default)]
    pub rules_channel_name: Option<String>,
    #[serde(default)]
    pub system_channel_name: Option<String>,
    #[serde(default)]
    pub updates_channel_name: Option<String>,
    pub categories: Vec<CategoryTemplate>,
    #[serde(default)]
    pub community_features: Option<CommunityFeatures>,
    #[serde(default)]
    pub verification_level: VerificationLevel,
    #[serde(default)]
    pub default_notifications: NotificationLevel,
    #[serde(default)]
    pub explicit_content_filter: ContentFilter,
    #[serde(default)]
    pub preferred_locale: Option<Locale>,
}

/// Validated desired state of a guild.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuildConfig {
    pub roles: Vec<RoleTemplate>,
    pub system_channel: Option<SystemChannel>,
    pub categories: Vec<CategoryTemplate>,
    pub community_features: Option<CommunityFeatures>,
    pub verification_level: VerificationLevel,
    pub default_notifications: NotificationLevel,
    pub explicit_content_filter: ContentFilter,
    pub preferred_locale: Option<Locale>,
}

impl GuildConfig {
    /// Reads, parses and validates a configuration document.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let document: GuildConfigDocument = serde_json::from_str(content)?;

        Ok(Self::try_from(document)?)
    }

    /// Every declared channel paired with the category it belongs to, in declaration order.
    pub fn channels(&self) -> impl Iterator<Item = (&CategoryTemplate, &ChannelTemplate)> {
        self.categories.iter().flat_map(|category| {
            category
                .channels
                .iter()
                .map(move |channel| (category, channel))
        })
    }

    /// Checks that every reference in the configuration points to something it declares.
    ///
    /// `extra_channels` names channels referenced outside the category tree.
    fn validate_with_references(&self, extra_channels: &[&str]) -> Result<(), ValidationError> {
        ensure_unique("role", self.roles.iter().map(|role| role.name.as_str()))?;
        ensure_unique(
            "category",
            self.categories.iter().map(|category| category.name.as_str()),
        )?;
        ensure_unique("channel", self.channels().map(|(_, channel)| channel.name()))?;

        let declared_channels: HashSet<&str> =
            self.channels().map(|(_, channel)| channel.name()).collect();
        let mut referenced: Vec<&str> = self.referenced_channels().collect();
        referenced.extend_from_slice(extra_channels);
        let mut missing_channels: Vec<String> = Vec::new();
        for name in referenced {
            if !declared_channels.contains(name) && !missing_channels.iter().any(|m| m == name) {
                missing_channels.push(name.to_string());
            }
        }
        if !missing_channels.is_empty() {
            return Err(ValidationError::MissingChannels(missing_channels));
        }

        let declared_roles: HashSet<&str> =
            self.roles.iter().map(|role| role.name.as_str()).collect();
        let missing_roles: BTreeSet<&str> = self
            .overwrites()
            .flat_map(|overwrite| overwrite.roles.iter().map(String::as_str))
            .filter(|role| !declared_roles.contains(role))
            .collect();
        if !missing_roles.is_empty() {
            return Err(ValidationError::MissingRoles(
                missing_roles.into_iter().map(str::to_string).collect(),
            ));
        }

        if self.community_features.is_some() && self.verification_level < VerificationLevel::Medium
        {
            return Err(ValidationError::VerificationLevelTooLow);
        }

        Ok(())
    }

    fn referenced_channels(&self) -> impl Iterator<Item = &str> {
        let system = self.system_channel.iter().map(|system| system.name.as_str());
        let community = self.community_features.iter().flat_map(|features| {
            [
                features.rules_channel.as_str(),
                features.public_updates_channel.as_str(),
                features.safety_alerts_channel.as_str(),
            ]
        });

        system.chain(community)
    }

    fn overwrites(&self) -> impl Iterator<Item = &PermissionOverwriteTemplate> {
        self.categories.iter().flat_map(|category| {
            category.permission_overwrites.iter().chain(
                category
                    .channels
                    .iter()
                    .flat_map(|channel| channel.permission_overwrites().iter()),
            )
        })
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

impl TryFrom<GuildConfigDocument> for GuildConfig {
    type Error = ValidationError;

    fn try_from(document: GuildConfigDocument) -> Result<Self, Self::Error> {
        let system_channel = match (document.system_channel, document.system_channel_name) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingSystemChannel),
            (Some(system_channel), None) => Some(system_channel),
            (None, Some(name)) => Some(SystemChannel::named(name)),
            (None, None) => None,
        };

        let config = GuildConfig {
            roles: document.roles,
            system_channel,
            categories: document.categories,
            community_features: document.community_features,
            verification_level: document.verification_level,
            default_notifications: document.default_notifications,
            explicit_content_filter: document.explicit_content_filter,
            preferred_locale: document.preferred_locale,
        };

        let legacy: Vec<&str> = document
            .rules_channel_name
            .iter()
            .chain(document.updates_channel_name.iter())
            .map(String::as_str)
            .collect();
        config.validate_with_references(&legacy)?;

        Ok(config)
    }
}
