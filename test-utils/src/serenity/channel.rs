//! Test factory for creating Serenity GuildChannel and ForumTag objects.
//!
//! Channels of every kind the configurator manages (category, text, voice and forum) are
//! built through [`ChannelFactory`] by deserializing the JSON Discord's API would return.

use serde_json::{json, Value};
use serenity::all::{ForumTag, GuildChannel};

use crate::fixture::{next_id, GUILD_ID};

/// Discord channel type numbers.
const TEXT: u8 = 0;
const VOICE: u8 = 2;
const CATEGORY: u8 = 4;
const FORUM: u8 = 15;

/// Channel flag marking a forum that requires a tag on every post.
const REQUIRE_TAG: u64 = 1 << 4;

/// Factory for creating test guild channels.
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::ChannelFactory;
///
/// let category = ChannelFactory::category("Info").position(0).build();
/// let rules = ChannelFactory::text("rules")
///     .parent(category.id.get())
///     .topic("Read me")
///     .overwrite(moderators.id.get(), 1 << 11, 0)
///     .build();
/// ```
pub struct ChannelFactory {
    id: u64,
    guild_id: u64,
    kind: u8,
    name: String,
    position: u16,
    parent_id: Option<u64>,
    topic: Option<String>,
    overwrites: Vec<Value>,
    tags: Vec<Value>,
    flags: u64,
}

impl ChannelFactory {
    fn new(kind: u8, name: &str) -> Self {
        Self {
            id: next_id(),
            guild_id: GUILD_ID,
            kind,
            name: name.to_string(),
            position: 0,
            parent_id: None,
            topic: None,
            overwrites: Vec::new(),
            tags: Vec::new(),
            flags: 0,
        }
    }

    pub fn text(name: &str) -> Self {
        Self::new(TEXT, name)
    }

    pub fn voice(name: &str) -> Self {
        Self::new(VOICE, name)
    }

    pub fn forum(name: &str) -> Self {
        Self::new(FORUM, name)
    }

    pub fn category(name: &str) -> Self {
        Self::new(CATEGORY, name)
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn guild(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn position(mut self, position: u16) -> Self {
        self.position = position;
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    /// Adds a role permission overwrite.
    ///
    /// # Arguments
    /// - `role_id` - Role the overwrite applies to
    /// - `allow` - Permission bits explicitly allowed
    /// - `deny` - Permission bits explicitly denied
    pub fn overwrite(mut self, role_id: u64, allow: u64, deny: u64) -> Self {
        self.overwrites.push(json!({
            "id": role_id.to_string(),
            "type": 0,
            "allow": allow.to_string(),
            "deny": deny.to_string(),
        }));
        self
    }

    /// Adds an available forum tag.
    pub fn tag(mut self, tag_id: u64, name: &str) -> Self {
        self.tags.push(forum_tag_json(tag_id, name));
        self
    }

    /// Adds one available forum tag per name, with fresh ids.
    pub fn tags(self, names: &[&str]) -> Self {
        names
            .iter()
            .fold(self, |factory, name| factory.tag(next_id(), name))
    }

    pub fn require_tag(mut self) -> Self {
        self.flags |= REQUIRE_TAG;
        self
    }

    /// Builds the channel.
    ///
    /// # Panics
    /// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
    pub fn build(self) -> GuildChannel {
        serde_json::from_value(json!({
            "id": self.id.to_string(),
            "guild_id": self.guild_id.to_string(),
            "type": self.kind,
            "name": self.name,
            "position": self.position,
            "parent_id": self.parent_id.map(|id| id.to_string()),
            "topic": self.topic,
            "nsfw": false,
            "permission_overwrites": self.overwrites,
            "flags": self.flags,
            "available_tags": self.tags,
        }))
        .expect("Failed to create test channel - invalid JSON structure")
    }
}

fn forum_tag_json(tag_id: u64, name: &str) -> Value {
    json!({
        "id": tag_id.to_string(),
        "name": name,
        "moderated": false,
        "emoji_id": null,
        "emoji_name": null,
    })
}

/// Creates a test forum tag without emoji.
///
/// # Arguments
/// - `tag_id` - Discord tag ID (snowflake)
/// - `name` - Tag name
///
/// # Returns
/// - `ForumTag` - A valid Serenity ForumTag struct for testing
pub fn create_test_forum_tag(tag_id: u64, name: &str) -> ForumTag {
    serde_json::from_value(forum_tag_json(tag_id, name))
        .expect("Failed to create test forum tag - invalid JSON structure")
}
