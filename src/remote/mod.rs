//! Access to the live guild.
//!
//! The reconciler never talks to Discord directly. It reads and mutates the guild through
//! [`GuildRemote`], implemented by [`discord::SerenityGuild`] for a real guild and by
//! [`memory::MemoryGuild`] for dry runs and tests. Every read returns a fresh copy of the
//! live state, nothing is cached between calls.

pub mod discord;
pub mod edit;
pub mod lookup;
pub mod memory;

use serenity::all::{
    ChannelId, ForumTag, GuildChannel, GuildId, Message, MessageId, Role, RoleId,
    SystemChannelFlags, UserId,
};
use serenity::async_trait;

use crate::{
    error::remote::RemoteError,
    model::level::{ContentFilter, NotificationLevel, VerificationLevel},
    remote::edit::{ChannelEdit, GuildEdit, NewChannel, NewRole, RoleEdit},
};

/// Guild feature flag set once community features are enabled.
pub const COMMUNITY_FEATURE: &str = "COMMUNITY";

/// Guild-wide settings the reconciler compares against the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    pub system_channel_id: Option<ChannelId>,
    pub system_channel_flags: SystemChannelFlags,
    pub verification_level: VerificationLevel,
    pub default_notifications: NotificationLevel,
    pub explicit_content_filter: ContentFilter,
    /// Locale code such as `en-US`.
    pub preferred_locale: String,
    pub features: Vec<String>,
}

impl GuildSettings {
    pub fn has_community(&self) -> bool {
        self.features.iter().any(|feature| feature == COMMUNITY_FEATURE)
    }
}

impl Default for GuildSettings {
    fn default() -> Self {
        Self {
            system_channel_id: None,
            system_channel_flags: SystemChannelFlags::empty(),
            verification_level: VerificationLevel::None,
            default_notifications: NotificationLevel::AllMessages,
            explicit_content_filter: ContentFilter::Disabled,
            preferred_locale: "en-US".to_string(),
            features: Vec::new(),
        }
    }
}

/// Read and write access to one guild.
///
/// Each mutation is exactly one remote call.
#[async_trait]
pub trait GuildRemote: Send + Sync {
    fn guild_id(&self) -> GuildId;

    /// User id of the bot performing the changes, used to tell its own messages apart.
    fn bot_user_id(&self) -> UserId;

    async fn settings(&self) -> Result<GuildSettings, RemoteError>;

    async fn roles(&self) -> Result<Vec<Role>, RemoteError>;

    /// All channels of the guild, categories included.
    async fn channels(&self) -> Result<Vec<GuildChannel>, RemoteError>;

    /// Full message history of a channel, oldest first.
    async fn messages(&self, channel: ChannelId) -> Result<Vec<Message>, RemoteError>;

    async fn create_role(&self, role: NewRole) -> Result<Role, RemoteError>;

    async fn edit_role(&self, role: RoleId, edit: RoleEdit) -> Result<(), RemoteError>;

    async fn create_channel(&self, channel: NewChannel) -> Result<GuildChannel, RemoteError>;

    async fn edit_channel(&self, channel: ChannelId, edit: ChannelEdit)
        -> Result<(), RemoteError>;

    /// Adds a tag to a forum channel and returns it with its assigned id.
    async fn create_forum_tag(&self, channel: ChannelId, name: &str)
        -> Result<ForumTag, RemoteError>;

    async fn edit_guild(&self, edit: GuildEdit) -> Result<(), RemoteError>;

    async fn delete_message(&self, channel: ChannelId, message: MessageId)
        -> Result<(), RemoteError>;

    /// Sends a message with link previews suppressed.
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), RemoteError>;
}
