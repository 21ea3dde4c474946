//! [`GuildRemote`] over an in-memory copy of a guild.
//!
//! Every mutation is applied to the copy and appended to a call log, so a reconciliation
//! run against a `MemoryGuild` shows exactly which remote calls it would have made. The
//! `plan` command seeds it from a snapshot of the live guild; tests seed it from fixtures.

use std::collections::HashMap;
use std::fmt;

use serde_json::json;
use serenity::all::{
    ChannelFlags, ChannelId, ForumTag, GuildChannel, GuildId, Message, MessageId,
    PermissionOverwriteType, Role, RoleId, UserId,
};
use serenity::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::remote::RemoteError,
    remote::{
        edit::{ChannelEdit, ChannelKind, GuildEdit, NewChannel, NewRole, RoleEdit},
        GuildRemote, GuildSettings, COMMUNITY_FEATURE,
    },
};

/// A remote call recorded by [`MemoryGuild`], with entities referred to by name.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    CreateRole(NewRole),
    EditRole {
        role: String,
        edit: RoleEdit,
    },
    CreateChannel {
        name: String,
        kind: ChannelKind,
        parent: Option<String>,
        position: u16,
    },
    SetParent {
        channel: String,
        parent: String,
    },
    SetPosition {
        channel: String,
        position: u16,
    },
    SetTopic {
        channel: String,
        topic: String,
    },
    SetOverwrites {
        channel: String,
        roles: Vec<String>,
    },
    CreateForumTag {
        channel: String,
        tag: String,
    },
    SetForumTags {
        channel: String,
        tags: Vec<String>,
    },
    SetRequireTag {
        channel: String,
    },
    EditGuild(GuildEdit),
    DeleteMessage {
        channel: String,
        content: String,
    },
    SendMessage {
        channel: String,
        content: String,
    },
}

impl fmt::Display for RemoteCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateRole(role) => write!(
                f,
                "create role '{}' (colour #{:06X}, hoist {}, mentionable {})",
                role.name, role.colour.0, role.hoist, role.mentionable
            ),
            Self::EditRole { role, edit } => write!(f, "edit role '{role}': {edit:?}"),
            Self::CreateChannel {
                name,
                kind,
                parent,
                position,
            } => {
                write!(f, "create {kind:?} channel '{name}' at position {position}")?;
                if let Some(parent) = parent {
                    write!(f, " in '{parent}'")?;
                }
                Ok(())
            }
            Self::SetParent { channel, parent } => {
                write!(f, "move channel '{channel}' into '{parent}'")
            }
            Self::SetPosition { channel, position } => {
                write!(f, "move channel '{channel}' to position {position}")
            }
            Self::SetTopic { channel, topic } => {
                write!(f, "set topic of '{channel}' to {topic:?}")
            }
            Self::SetOverwrites { channel, roles } => write!(
                f,
                "replace permission overwrites of '{channel}' for roles {}",
                roles.join(", ")
            ),
            Self::CreateForumTag { channel, tag } => {
                write!(f, "create tag '{tag}' in '{channel}'")
            }
            Self::SetForumTags { channel, tags } => {
                write!(f, "set tags of '{channel}' to {}", tags.join(", "))
            }
            Self::SetRequireTag { channel } => write!(f, "require a tag in '{channel}'"),
            Self::EditGuild(edit) => write!(f, "edit guild: {edit:?}"),
            Self::DeleteMessage { channel, content } => {
                write!(f, "delete message {content:?} in '{channel}'")
            }
            Self::SendMessage { channel, content } => {
                write!(f, "send message {content:?} to '{channel}'")
            }
        }
    }
}

struct MemoryState {
    settings: GuildSettings,
    roles: Vec<Role>,
    channels: Vec<GuildChannel>,
    messages: HashMap<ChannelId, Vec<Message>>,
    calls: Vec<RemoteCall>,
    next_id: u64,
}

impl MemoryState {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn reserve_id(&mut self, id: u64) {
        self.next_id = self.next_id.max(id + 1);
    }

    fn role_name(&self, id: RoleId) -> Result<String, RemoteError> {
        self.roles
            .iter()
            .find(|role| role.id == id)
            .map(|role| role.name.clone())
            .ok_or(RemoteError::UnknownRole(id))
    }

    fn channel_mut(&mut self, id: ChannelId) -> Result<&mut GuildChannel, RemoteError> {
        self.channels
            .iter_mut()
            .find(|channel| channel.id == id)
            .ok_or(RemoteError::UnknownChannel(id))
    }

    fn channel_name(&self, id: ChannelId) -> Result<String, RemoteError> {
        self.channels
            .iter()
            .find(|channel| channel.id == id)
            .map(|channel| channel.name.clone())
            .ok_or(RemoteError::UnknownChannel(id))
    }
}

/// In-memory guild implementing [`GuildRemote`].
pub struct MemoryGuild {
    guild_id: GuildId,
    bot_user_id: UserId,
    state: Mutex<MemoryState>,
}

impl MemoryGuild {
    /// A guild holding nothing but its `@everyone` role.
    pub fn new(guild_id: GuildId, bot_user_id: UserId) -> Result<Self, RemoteError> {
        let everyone = serde_json::from_value(json!({
            "id": guild_id.to_string(),
            "name": "@everyone",
            "color": 0,
            "colors": { "primary_color": 0 },
            "hoist": false,
            "position": 0,
            "permissions": "0",
            "managed": false,
            "mentionable": false,
        }))?;

        let mut state = MemoryState {
            settings: GuildSettings::default(),
            roles: vec![everyone],
            channels: Vec::new(),
            messages: HashMap::new(),
            calls: Vec::new(),
            next_id: 1,
        };
        state.reserve_id(guild_id.get());
        state.reserve_id(bot_user_id.get());

        Ok(Self {
            guild_id,
            bot_user_id,
            state: Mutex::new(state),
        })
    }

    pub fn with_settings(mut self, settings: GuildSettings) -> Self {
        self.state.get_mut().settings = settings;
        self
    }

    /// Adds a role, replacing any role with the same id.
    pub fn with_role(mut self, role: Role) -> Self {
        let state = self.state.get_mut();
        state.reserve_id(role.id.get());
        state.roles.retain(|existing| existing.id != role.id);
        state.roles.push(role);
        self
    }

    pub fn with_channel(mut self, channel: GuildChannel) -> Self {
        let state = self.state.get_mut();
        state.reserve_id(channel.id.get());
        state.channels.push(channel);
        self
    }

    /// Appends messages to a channel's history, oldest first.
    pub fn with_messages(mut self, channel: ChannelId, messages: Vec<Message>) -> Self {
        let state = self.state.get_mut();
        for message in &messages {
            state.reserve_id(message.id.get());
        }
        state.messages.entry(channel).or_default().extend(messages);
        self
    }

    /// Copies the current state of another remote.
    ///
    /// Message history is only copied for the named channels, since reading it costs one
    /// request per hundred messages.
    pub async fn capture(
        remote: &dyn GuildRemote,
        history_of: &[&str],
    ) -> Result<Self, RemoteError> {
        let mut guild = Self::new(remote.guild_id(), remote.bot_user_id())?
            .with_settings(remote.settings().await?);

        for role in remote.roles().await? {
            guild = guild.with_role(role);
        }

        let channels = remote.channels().await?;
        for channel in &channels {
            if history_of.contains(&channel.name.as_str()) {
                let messages = remote.messages(channel.id).await?;
                guild = guild.with_messages(channel.id, messages);
            }
        }
        for channel in channels {
            guild = guild.with_channel(channel);
        }

        Ok(guild)
    }

    /// Remote calls made so far, in order.
    pub async fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().await.calls.clone()
    }

    /// Returns the calls made so far and clears the log.
    #[cfg(test)]
    pub async fn take_calls(&self) -> Vec<RemoteCall> {
        std::mem::take(&mut self.state.lock().await.calls)
    }

    #[cfg(test)]
    pub async fn role(&self, name: &str) -> Option<Role> {
        let state = self.state.lock().await;
        state.roles.iter().find(|role| role.name == name).cloned()
    }

    #[cfg(test)]
    pub async fn channel(&self, name: &str) -> Option<GuildChannel> {
        let state = self.state.lock().await;
        state
            .channels
            .iter()
            .find(|channel| channel.name == name)
            .cloned()
    }

    #[cfg(test)]
    pub async fn current_settings(&self) -> GuildSettings {
        self.state.lock().await.settings.clone()
    }

    /// Message contents of a channel, oldest first.
    #[cfg(test)]
    pub async fn message_contents(&self, channel: ChannelId) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .messages
            .get(&channel)
            .map(|messages| messages.iter().map(|m| m.content.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GuildRemote for MemoryGuild {
    fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    fn bot_user_id(&self) -> UserId {
        self.bot_user_id
    }

    async fn settings(&self) -> Result<GuildSettings, RemoteError> {
        Ok(self.state.lock().await.settings.clone())
    }

    async fn roles(&self) -> Result<Vec<Role>, RemoteError> {
        Ok(self.state.lock().await.roles.clone())
    }

    async fn channels(&self) -> Result<Vec<GuildChannel>, RemoteError> {
        Ok(self.state.lock().await.channels.clone())
    }

    async fn messages(&self, channel: ChannelId) -> Result<Vec<Message>, RemoteError> {
        let state = self.state.lock().await;
        state.channel_name(channel)?;

        Ok(state.messages.get(&channel).cloned().unwrap_or_default())
    }

    async fn create_role(&self, role: NewRole) -> Result<Role, RemoteError> {
        let mut state = self.state.lock().await;
        let id = state.allocate_id();
        let position = state.roles.len();
        let created: Role = serde_json::from_value(json!({
            "id": id.to_string(),
            "name": role.name,
            "color": role.colour.0,
            "colors": { "primary_color": role.colour.0 },
            "hoist": role.hoist,
            "position": position,
            "permissions": role.permissions.bits().to_string(),
            "managed": false,
            "mentionable": role.mentionable,
        }))?;

        state.roles.push(created.clone());
        state.calls.push(RemoteCall::CreateRole(role));
        Ok(created)
    }

    async fn edit_role(&self, id: RoleId, edit: RoleEdit) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let name = state.role_name(id)?;
        if let Some(role) = state.roles.iter_mut().find(|role| role.id == id) {
            if let Some(colour) = edit.colour {
                role.colour = colour;
            }
            if let Some(hoist) = edit.hoist {
                role.hoist = hoist;
            }
            if let Some(mentionable) = edit.mentionable {
                role.mentionable = mentionable;
            }
            if let Some(permissions) = edit.permissions {
                role.permissions = permissions;
            }
        }

        state.calls.push(RemoteCall::EditRole { role: name, edit });
        Ok(())
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<GuildChannel, RemoteError> {
        let mut state = self.state.lock().await;
        let parent = channel
            .parent
            .map(|parent| state.channel_name(parent))
            .transpose()?;
        let id = state.allocate_id();
        let created: GuildChannel = serde_json::from_value(json!({
            "id": id.to_string(),
            "guild_id": self.guild_id.to_string(),
            "type": u8::from(channel.kind.channel_type()),
            "name": channel.name,
            "position": channel.position,
            "parent_id": channel.parent.map(|parent| parent.to_string()),
            "topic": null,
            "nsfw": false,
            "permission_overwrites": [],
            "flags": 0,
            "available_tags": [],
        }))?;

        state.channels.push(created.clone());
        state.calls.push(RemoteCall::CreateChannel {
            name: channel.name,
            kind: channel.kind,
            parent,
            position: channel.position,
        });
        Ok(created)
    }

    async fn edit_channel(&self, id: ChannelId, edit: ChannelEdit) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let name = state.channel_name(id)?;

        let call = match edit {
            ChannelEdit::Parent(parent) => {
                let parent_name = state.channel_name(parent)?;
                state.channel_mut(id)?.parent_id = Some(parent);
                RemoteCall::SetParent {
                    channel: name,
                    parent: parent_name,
                }
            }
            ChannelEdit::Position(position) => {
                state.channel_mut(id)?.position = position;
                RemoteCall::SetPosition {
                    channel: name,
                    position,
                }
            }
            ChannelEdit::Topic(topic) => {
                state.channel_mut(id)?.topic = (!topic.is_empty()).then(|| topic.clone());
                RemoteCall::SetTopic {
                    channel: name,
                    topic,
                }
            }
            ChannelEdit::Overwrites(overwrites) => {
                let roles = overwrites
                    .iter()
                    .map(|overwrite| match overwrite.kind {
                        PermissionOverwriteType::Role(role) => state.role_name(role),
                        PermissionOverwriteType::Member(user) => Ok(format!("member {user}")),
                        _ => Ok(String::new()),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                state.channel_mut(id)?.permission_overwrites = overwrites;
                RemoteCall::SetOverwrites {
                    channel: name,
                    roles,
                }
            }
            ChannelEdit::AvailableTags(tags) => {
                let names = tags.iter().map(|tag| tag.name.clone()).collect();
                state.channel_mut(id)?.available_tags = tags;
                RemoteCall::SetForumTags {
                    channel: name,
                    tags: names,
                }
            }
            ChannelEdit::RequireTag => {
                let channel = state.channel_mut(id)?;
                channel.flags |= ChannelFlags::REQUIRE_TAG;
                RemoteCall::SetRequireTag { channel: name }
            }
        };

        state.calls.push(call);
        Ok(())
    }

    async fn create_forum_tag(&self, id: ChannelId, name: &str) -> Result<ForumTag, RemoteError> {
        let mut state = self.state.lock().await;
        let channel_name = state.channel_name(id)?;
        let tag_id = state.allocate_id();
        let tag: ForumTag = serde_json::from_value(json!({
            "id": tag_id.to_string(),
            "name": name,
            "moderated": false,
            "emoji_id": null,
            "emoji_name": null,
        }))?;

        state.channel_mut(id)?.available_tags.push(tag.clone());
        state.calls.push(RemoteCall::CreateForumTag {
            channel: channel_name,
            tag: name.to_string(),
        });
        Ok(tag)
    }

    async fn edit_guild(&self, edit: GuildEdit) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let settings = &mut state.settings;
        match &edit {
            GuildEdit::SystemChannel(channel) => settings.system_channel_id = Some(*channel),
            GuildEdit::SystemChannelFlags(flags) => settings.system_channel_flags = *flags,
            GuildEdit::VerificationLevel(level) => settings.verification_level = *level,
            GuildEdit::DefaultNotifications(level) => settings.default_notifications = *level,
            GuildEdit::PreferredLocale(locale) => {
                settings.preferred_locale = locale.code().to_string()
            }
            GuildEdit::EnableCommunity(community) => {
                settings.explicit_content_filter = community.explicit_content_filter;
                if !settings.has_community() {
                    settings.features.push(COMMUNITY_FEATURE.to_string());
                }
            }
        }

        state.calls.push(RemoteCall::EditGuild(edit));
        Ok(())
    }

    async fn delete_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let channel_name = state.channel_name(channel)?;
        let history = state.messages.entry(channel).or_default();
        let index = history
            .iter()
            .position(|existing| existing.id == message)
            .ok_or(RemoteError::UnknownMessage { channel, message })?;
        let removed = history.remove(index);

        state.calls.push(RemoteCall::DeleteMessage {
            channel: channel_name,
            content: removed.content,
        });
        Ok(())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock().await;
        let channel_name = state.channel_name(channel)?;
        let id = state.allocate_id();
        let message: Message = serde_json::from_value(json!({
            "id": id.to_string(),
            "channel_id": channel.to_string(),
            "author": {
                "id": self.bot_user_id.to_string(),
                "username": "configurator",
                "discriminator": "0000",
                "avatar": null,
                "bot": true,
            },
            "content": content,
            "timestamp": "2024-01-01T00:00:00.000000+00:00",
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "pinned": false,
            "type": 0,
            "flags": 4,
        }))?;

        state.messages.entry(channel).or_default().push(message);
        state.calls.push(RemoteCall::SendMessage {
            channel: channel_name,
            content: content.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serenity::all::{Colour, Permissions};

    use super::*;

    /// Tests that a fresh memory guild deserializes its `@everyone` role.
    ///
    /// Expected: Ok with one role named `@everyone` at the guild's id
    #[tokio::test]
    async fn new_guild_holds_everyone_role() -> Result<(), RemoteError> {
        let guild = MemoryGuild::new(GuildId::new(100), UserId::new(200))?;

        let roles = guild.roles().await?;
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "@everyone");
        assert_eq!(roles[0].id.get(), 100);
        Ok(())
    }

    /// Tests creating a role in the memory guild.
    ///
    /// Expected: Ok with the role's name and colour kept and the call logged
    #[tokio::test]
    async fn create_role_keeps_name_and_colour() -> Result<(), RemoteError> {
        let guild = MemoryGuild::new(GuildId::new(100), UserId::new(200))?;

        let created = guild
            .create_role(NewRole {
                name: "Moderators".to_string(),
                colour: Colour(0x3498db),
                hoist: true,
                mentionable: false,
                permissions: Permissions::KICK_MEMBERS,
            })
            .await?;

        assert_eq!(created.name, "Moderators");
        assert_eq!(created.colour, Colour(0x3498db));
        assert!(created.hoist);
        assert_eq!(created.permissions, Permissions::KICK_MEMBERS);
        assert_eq!(
            guild.role("Moderators").await.map(|role| role.id),
            Some(created.id)
        );
        assert_eq!(guild.calls().await.len(), 1);
        Ok(())
    }
}
