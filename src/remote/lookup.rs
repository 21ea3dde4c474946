//! Name-based lookups into the live guild.

use std::fmt;

use serenity::all::{ChannelId, ChannelType, GuildChannel, Role};

use crate::{
    error::reconcile::ReconcileError,
    model::role::EVERYONE,
    remote::GuildRemote,
};

/// Kinds of entity the configuration refers to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Role,
    /// Text or announcement channel.
    TextChannel,
    VoiceChannel,
    ForumChannel,
    Category,
    /// Any channel messages can be posted in: text, announcement, voice or forum.
    PostableChannel,
}

impl EntityKind {
    fn matches(self, kind: ChannelType) -> bool {
        match self {
            Self::Role => false,
            Self::TextChannel => matches!(kind, ChannelType::Text | ChannelType::News),
            Self::VoiceChannel => kind == ChannelType::Voice,
            Self::ForumChannel => kind == ChannelType::Forum,
            Self::Category => kind == ChannelType::Category,
            Self::PostableChannel => matches!(
                kind,
                ChannelType::Text | ChannelType::News | ChannelType::Voice | ChannelType::Forum
            ),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Role => "role",
            Self::TextChannel => "text channel",
            Self::VoiceChannel => "voice channel",
            Self::ForumChannel => "forum channel",
            Self::Category => "category",
            Self::PostableChannel => "text, forum, or voice channel",
        };
        f.write_str(name)
    }
}

/// A live role or channel found by name.
#[derive(Debug, Clone)]
pub enum Entity {
    Role(Role),
    Channel(GuildChannel),
}

impl Entity {
    /// Mention syntax for use in message content.
    pub fn mention(&self) -> String {
        match self {
            Self::Role(role) if role.name == EVERYONE => EVERYONE.to_string(),
            Self::Role(role) => format!("<@&{}>", role.id),
            Self::Channel(channel) => format!("<#{}>", channel.id),
        }
    }
}

/// Looks up live entities by exact name.
///
/// Every lookup fetches the collection again so that writes made earlier in the same run
/// are visible. When several entities share a name, the one with the lowest position (then
/// lowest id) wins.
pub struct GuildState<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> GuildState<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    pub async fn find(&self, kind: EntityKind, name: &str) -> Result<Entity, ReconcileError> {
        match kind {
            EntityKind::Role => self.find_role(name).await.map(Entity::Role),
            _ => self.find_channel(kind, name).await.map(Entity::Channel),
        }
    }

    pub async fn try_find_role(&self, name: &str) -> Result<Option<Role>, ReconcileError> {
        let mut roles: Vec<Role> = self
            .remote
            .roles()
            .await?
            .into_iter()
            .filter(|role| role.name == name)
            .collect();
        roles.sort_by_key(|role| (role.position, role.id));

        Ok(roles.into_iter().next())
    }

    pub async fn find_role(&self, name: &str) -> Result<Role, ReconcileError> {
        self.try_find_role(name)
            .await?
            .ok_or_else(|| ReconcileError::not_found(EntityKind::Role, name))
    }

    pub async fn try_find_channel(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<Option<GuildChannel>, ReconcileError> {
        let mut channels: Vec<GuildChannel> = self
            .remote
            .channels()
            .await?
            .into_iter()
            .filter(|channel| channel.name == name && kind.matches(channel.kind))
            .collect();
        channels.sort_by_key(|channel| (channel.position, channel.id));

        Ok(channels.into_iter().next())
    }

    pub async fn channel_by_id(
        &self,
        id: ChannelId,
    ) -> Result<Option<GuildChannel>, ReconcileError> {
        Ok(self
            .remote
            .channels()
            .await?
            .into_iter()
            .find(|channel| channel.id == id))
    }

    pub async fn find_channel(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<GuildChannel, ReconcileError> {
        self.try_find_channel(kind, name)
            .await?
            .ok_or_else(|| ReconcileError::not_found(kind, name))
    }
}
