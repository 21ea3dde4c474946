//! [`GuildRemote`] backed by Discord's REST API.

use std::sync::Arc;

use serde_json::{json, Value};
use serenity::all::{
    ChannelFlags, ChannelId, CreateChannel, CreateMessage, EditChannel, EditRole, ForumTag,
    GetMessages, GuildChannel, GuildId, Http, Message, MessageFlags, MessageId, Role, RoleId,
    UserId,
};
use serenity::async_trait;
use tracing::debug;

use crate::{
    error::remote::RemoteError,
    model::level::{ContentFilter, NotificationLevel, VerificationLevel},
    remote::{
        edit::{ChannelEdit, GuildEdit, NewChannel, NewRole, RoleEdit},
        GuildRemote, GuildSettings, COMMUNITY_FEATURE,
    },
};

/// Largest page Discord returns when reading channel history.
const MESSAGE_PAGE_SIZE: u8 = 100;

/// One guild reached through serenity's HTTP client.
pub struct SerenityGuild {
    http: Arc<Http>,
    guild_id: GuildId,
    bot_user_id: UserId,
}

impl SerenityGuild {
    pub fn new(http: Arc<Http>, guild_id: GuildId, bot_user_id: UserId) -> Self {
        Self {
            http,
            guild_id,
            bot_user_id,
        }
    }

    /// Resolves the bot's own user id before wrapping the client.
    pub async fn connect(http: Arc<Http>, guild_id: GuildId) -> Result<Self, RemoteError> {
        let bot_user = http.get_current_user().await?;

        Ok(Self::new(http, guild_id, bot_user.id))
    }

    async fn channel(&self, channel: ChannelId) -> Result<GuildChannel, RemoteError> {
        self.http
            .get_channel(channel)
            .await?
            .guild()
            .ok_or(RemoteError::UnknownChannel(channel))
    }

    async fn patch_channel(&self, channel: ChannelId, payload: &Value) -> Result<(), RemoteError> {
        self.http.edit_channel(channel, payload, None).await?;
        Ok(())
    }
}

fn level<T>(field: &'static str, value: u8, parse: fn(u8) -> Option<T>) -> Result<T, RemoteError> {
    parse(value).ok_or(RemoteError::UnexpectedValue {
        field,
        value: value.to_string(),
    })
}

fn tags_payload(tags: &[ForumTag]) -> Result<Value, RemoteError> {
    let tags = tags
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({ "available_tags": tags }))
}

fn guild_payload(edit: &GuildEdit, features: &[String]) -> Value {
    match edit {
        GuildEdit::SystemChannel(channel) => json!({ "system_channel_id": channel.to_string() }),
        GuildEdit::SystemChannelFlags(flags) => json!({ "system_channel_flags": flags.bits() }),
        GuildEdit::VerificationLevel(level) => json!({ "verification_level": level.api_value() }),
        GuildEdit::DefaultNotifications(level) => {
            json!({ "default_message_notifications": level.api_value() })
        }
        GuildEdit::PreferredLocale(locale) => json!({ "preferred_locale": locale.code() }),
        GuildEdit::EnableCommunity(community) => {
            let mut features = features.to_vec();
            if !features.iter().any(|feature| feature == COMMUNITY_FEATURE) {
                features.push(COMMUNITY_FEATURE.to_string());
            }

            json!({
                "features": features,
                "rules_channel_id": community.rules_channel.to_string(),
                "public_updates_channel_id": community.public_updates_channel.to_string(),
                "safety_alerts_channel_id": community.safety_alerts_channel.to_string(),
                "description": community.description,
                "explicit_content_filter": community.explicit_content_filter.api_value(),
            })
        }
    }
}

#[async_trait]
impl GuildRemote for SerenityGuild {
    fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    fn bot_user_id(&self) -> UserId {
        self.bot_user_id
    }

    async fn settings(&self) -> Result<GuildSettings, RemoteError> {
        let guild = self.http.get_guild(self.guild_id).await?;

        Ok(GuildSettings {
            system_channel_id: guild.system_channel_id,
            system_channel_flags: guild.system_channel_flags,
            verification_level: level(
                "verification_level",
                u8::from(guild.verification_level),
                VerificationLevel::from_api_value,
            )?,
            default_notifications: level(
                "default_message_notifications",
                u8::from(guild.default_message_notifications),
                NotificationLevel::from_api_value,
            )?,
            explicit_content_filter: level(
                "explicit_content_filter",
                u8::from(guild.explicit_content_filter),
                ContentFilter::from_api_value,
            )?,
            preferred_locale: guild.preferred_locale,
            features: guild.features,
        })
    }

    async fn roles(&self) -> Result<Vec<Role>, RemoteError> {
        Ok(self.http.get_guild_roles(self.guild_id).await?)
    }

    async fn channels(&self) -> Result<Vec<GuildChannel>, RemoteError> {
        Ok(self.http.get_channels(self.guild_id).await?)
    }

    async fn messages(&self, channel: ChannelId) -> Result<Vec<Message>, RemoteError> {
        let mut pages: Vec<Vec<Message>> = Vec::new();
        let mut before: Option<MessageId> = None;

        loop {
            let mut request = GetMessages::new().limit(MESSAGE_PAGE_SIZE);
            if let Some(before) = before {
                request = request.before(before);
            }

            let page = channel.messages(self.http.as_ref(), request).await?;
            before = next_cursor(&page);
            pages.push(page);

            if before.is_none() {
                break;
            }
        }

        let history = merge_pages(pages);
        debug!("Read {} messages from channel {}", history.len(), channel);
        Ok(history)
    }

    async fn create_role(&self, role: NewRole) -> Result<Role, RemoteError> {
        let builder = EditRole::new()
            .name(&role.name)
            .colour(role.colour)
            .hoist(role.hoist)
            .mentionable(role.mentionable)
            .permissions(role.permissions);

        Ok(self
            .guild_id
            .create_role(self.http.as_ref(), builder)
            .await?)
    }

    async fn edit_role(&self, role: RoleId, edit: RoleEdit) -> Result<(), RemoteError> {
        let mut builder = EditRole::new();
        if let Some(colour) = edit.colour {
            builder = builder.colour(colour);
        }
        if let Some(hoist) = edit.hoist {
            builder = builder.hoist(hoist);
        }
        if let Some(mentionable) = edit.mentionable {
            builder = builder.mentionable(mentionable);
        }
        if let Some(permissions) = edit.permissions {
            builder = builder.permissions(permissions);
        }

        self.guild_id
            .edit_role(self.http.as_ref(), role, builder)
            .await?;
        Ok(())
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<GuildChannel, RemoteError> {
        let mut builder = CreateChannel::new(&channel.name)
            .kind(channel.kind.channel_type())
            .position(channel.position);
        if let Some(parent) = channel.parent {
            builder = builder.category(parent);
        }

        Ok(self
            .guild_id
            .create_channel(self.http.as_ref(), builder)
            .await?)
    }

    async fn edit_channel(&self, channel: ChannelId, edit: ChannelEdit) -> Result<(), RemoteError> {
        match edit {
            ChannelEdit::Parent(parent) => {
                channel
                    .edit(self.http.as_ref(), EditChannel::new().category(Some(parent)))
                    .await?;
            }
            ChannelEdit::Position(position) => {
                channel
                    .edit(self.http.as_ref(), EditChannel::new().position(position))
                    .await?;
            }
            ChannelEdit::Topic(topic) => {
                channel
                    .edit(self.http.as_ref(), EditChannel::new().topic(topic))
                    .await?;
            }
            ChannelEdit::Overwrites(overwrites) => {
                channel
                    .edit(self.http.as_ref(), EditChannel::new().permissions(overwrites))
                    .await?;
            }
            // Tags and flags go through the raw endpoint so existing tag ids are kept.
            ChannelEdit::AvailableTags(tags) => {
                self.patch_channel(channel, &tags_payload(&tags)?).await?;
            }
            ChannelEdit::RequireTag => {
                let current = self.channel(channel).await?;
                let flags = current.flags | ChannelFlags::REQUIRE_TAG;
                self.patch_channel(channel, &json!({ "flags": flags.bits() }))
                    .await?;
            }
        }

        Ok(())
    }

    async fn create_forum_tag(
        &self,
        channel: ChannelId,
        name: &str,
    ) -> Result<ForumTag, RemoteError> {
        let current = self.channel(channel).await?;
        let mut payload = tags_payload(&current.available_tags)?;
        if let Some(tags) = payload["available_tags"].as_array_mut() {
            tags.push(json!({ "name": name }));
        }

        let updated = self.http.edit_channel(channel, &payload, None).await?;
        updated
            .available_tags
            .into_iter()
            .find(|tag| tag.name == name)
            .ok_or(RemoteError::UnexpectedValue {
                field: "available_tags",
                value: name.to_string(),
            })
    }

    async fn edit_guild(&self, edit: GuildEdit) -> Result<(), RemoteError> {
        let features = match edit {
            GuildEdit::EnableCommunity(_) => self.settings().await?.features,
            _ => Vec::new(),
        };

        self.http
            .edit_guild(self.guild_id, &guild_payload(&edit, &features), None)
            .await?;
        Ok(())
    }

    async fn delete_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), RemoteError> {
        channel
            .delete_message(self.http.as_ref(), message)
            .await?;
        Ok(())
    }

    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), RemoteError> {
        let message = CreateMessage::new()
            .content(content)
            .flags(MessageFlags::SUPPRESS_EMBEDS);

        channel.send_message(self.http.as_ref(), message).await?;
        Ok(())
    }
}

/// Cursor for the page after `page`, or `None` once history is exhausted.
///
/// Pages arrive newest first, so the next request starts before the last message.
fn next_cursor(page: &[Message]) -> Option<MessageId> {
    if page.len() < usize::from(MESSAGE_PAGE_SIZE) {
        return None;
    }
    page.last().map(|message| message.id)
}

/// Joins newest-first pages into one oldest-first history.
fn merge_pages(pages: Vec<Vec<Message>>) -> Vec<Message> {
    let mut history: Vec<Message> = pages.into_iter().flatten().collect();
    history.reverse();
    history
}

#[cfg(test)]
mod tests {
    use serenity::all::SystemChannelFlags;

    use test_utils::{fixture::HUMAN_USER_ID, serenity::create_test_message};

    use super::*;
    use crate::{model::level::Locale, remote::edit::EnableCommunity};

    #[test]
    fn enabling_community_keeps_existing_features() {
        let edit = GuildEdit::EnableCommunity(EnableCommunity {
            rules_channel: ChannelId::new(1),
            public_updates_channel: ChannelId::new(2),
            safety_alerts_channel: ChannelId::new(3),
            description: "A guild".to_string(),
            explicit_content_filter: ContentFilter::AllMembers,
        });

        let payload = guild_payload(&edit, &["NEWS".to_string()]);

        assert_eq!(payload["features"], json!(["NEWS", "COMMUNITY"]));
        assert_eq!(payload["rules_channel_id"], "1");
        assert_eq!(payload["safety_alerts_channel_id"], "3");
        assert_eq!(payload["explicit_content_filter"], 2);
    }

    #[test]
    fn simple_guild_edits_set_one_field() {
        let locale = guild_payload(&GuildEdit::PreferredLocale(Locale::German), &[]);
        let flags = guild_payload(
            &GuildEdit::SystemChannelFlags(SystemChannelFlags::from_bits_retain(0b101)),
            &[],
        );

        assert_eq!(locale, json!({ "preferred_locale": "de" }));
        assert_eq!(flags, json!({ "system_channel_flags": 5 }));
    }

    /// Splits an oldest-first history into newest-first pages the way Discord serves it.
    fn serve_pages(history: &[Message]) -> Vec<Vec<Message>> {
        let newest_first: Vec<Message> = history.iter().rev().cloned().collect();
        newest_first
            .chunks(usize::from(MESSAGE_PAGE_SIZE))
            .map(<[Message]>::to_vec)
            .collect()
    }

    fn history(count: usize) -> Vec<Message> {
        (0..count)
            .map(|n| create_test_message(1, HUMAN_USER_ID, &format!("message {n}")))
            .collect()
    }

    fn contents(messages: &[Message]) -> Vec<String> {
        messages.iter().map(|m| m.content.clone()).collect()
    }

    #[test]
    fn partial_page_ends_history() {
        let history = history(3);
        let pages = serve_pages(&history);

        assert_eq!(pages.len(), 1);
        assert_eq!(next_cursor(&pages[0]), None);
        assert_eq!(contents(&merge_pages(pages)), contents(&history));
    }

    #[test]
    fn full_page_requests_one_more() {
        let history = history(100);
        let mut pages = serve_pages(&history);

        assert_eq!(next_cursor(&pages[0]), Some(history[0].id));

        pages.push(Vec::new());
        assert_eq!(next_cursor(&pages[1]), None);
        assert_eq!(contents(&merge_pages(pages)), contents(&history));
    }

    #[test]
    fn history_spanning_two_pages_is_oldest_first() {
        let history = history(150);
        let pages = serve_pages(&history);

        assert_eq!(pages.len(), 2);
        assert_eq!(next_cursor(&pages[0]), Some(history[50].id));
        assert_eq!(next_cursor(&pages[1]), None);

        let merged = merge_pages(pages);
        assert_eq!(merged.len(), 150);
        assert_eq!(merged[0].content, "message 0");
        assert_eq!(merged[149].content, "message 149");
    }
}
