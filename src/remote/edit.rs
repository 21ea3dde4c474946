//! Mutations understood by [`GuildRemote`](super::GuildRemote), one value per remote call.

use serenity::all::{
    ChannelId, ChannelType, Colour, ForumTag, PermissionOverwrite, Permissions,
    SystemChannelFlags,
};

use crate::model::level::{ContentFilter, Locale, NotificationLevel, VerificationLevel};

#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub name: String,
    pub colour: Colour,
    pub hoist: bool,
    pub mentionable: bool,
    pub permissions: Permissions,
}

/// Changed role attributes. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleEdit {
    pub colour: Option<Colour>,
    pub hoist: Option<bool>,
    pub mentionable: Option<bool>,
    pub permissions: Option<Permissions>,
}

impl RoleEdit {
    pub fn is_empty(&self) -> bool {
        self.colour.is_none()
            && self.hoist.is_none()
            && self.mentionable.is_none()
            && self.permissions.is_none()
    }
}

/// Kinds of channel the configurator creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Category,
    Text,
    Voice,
    Forum,
}

impl ChannelKind {
    pub fn channel_type(self) -> ChannelType {
        match self {
            Self::Category => ChannelType::Category,
            Self::Text => ChannelType::Text,
            Self::Voice => ChannelType::Voice,
            Self::Forum => ChannelType::Forum,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChannel {
    pub name: String,
    pub kind: ChannelKind,
    pub parent: Option<ChannelId>,
    pub position: u16,
}

#[derive(Debug, Clone)]
pub enum ChannelEdit {
    /// Moves the channel into a category.
    Parent(ChannelId),
    Position(u16),
    Topic(String),
    /// Replaces every permission overwrite of the channel.
    Overwrites(Vec<PermissionOverwrite>),
    /// Replaces the full list of forum tags.
    AvailableTags(Vec<ForumTag>),
    /// Makes a tag mandatory for new forum posts.
    RequireTag,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuildEdit {
    SystemChannel(ChannelId),
    SystemChannelFlags(SystemChannelFlags),
    VerificationLevel(VerificationLevel),
    DefaultNotifications(NotificationLevel),
    PreferredLocale(Locale),
    EnableCommunity(EnableCommunity),
}

/// Settings Discord requires together when community features are first enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct EnableCommunity {
    pub rules_channel: ChannelId,
    pub public_updates_channel: ChannelId,
    pub safety_alerts_channel: ChannelId,
    pub description: String,
    pub explicit_content_filter: ContentFilter,
}
