//! Category and channel templates.
//!
//! Channels are a closed set of variants discriminated by their `type` key. Code that
//! handles channels matches on [`ChannelTemplate`] exhaustively, so a new kind of channel
//! shows up everywhere it needs handling.

use serde::{Deserialize, Serialize};

use crate::model::{permission::Permission, text};

/// Explicit allow/deny permissions for a list of roles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionOverwriteTemplate {
    pub roles: Vec<String>,
    #[serde(default)]
    pub allow: Vec<Permission>,
    #[serde(default)]
    pub deny: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TextChannel {
    pub name: String,
    #[serde(default, deserialize_with = "text::deserialize_multiline")]
    pub topic: String,
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwriteTemplate>,
    /// Messages the bot keeps in the channel, oldest first.
    #[serde(default, deserialize_with = "text::deserialize_multiline_list")]
    pub channel_messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceChannel {
    pub name: String,
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwriteTemplate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ForumChannel {
    pub name: String,
    #[serde(default, deserialize_with = "text::deserialize_multiline")]
    pub topic: String,
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwriteTemplate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub require_tag: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelTemplate {
    Text(TextChannel),
    Voice(VoiceChannel),
    Forum(ForumChannel),
}

impl ChannelTemplate {
    pub fn name(&self) -> &str {
        match self {
            Self::Text(channel) => &channel.name,
            Self::Voice(channel) => &channel.name,
            Self::Forum(channel) => &channel.name,
        }
    }

    pub fn permission_overwrites(&self) -> &[PermissionOverwriteTemplate] {
        match self {
            Self::Text(channel) => &channel.permission_overwrites,
            Self::Voice(channel) => &channel.permission_overwrites,
            Self::Forum(channel) => &channel.permission_overwrites,
        }
    }

    /// Declared topic, `None` for channels that have no topic.
    pub fn topic(&self) -> Option<&str> {
        match self {
            Self::Text(channel) => Some(&channel.topic),
            Self::Voice(_) => None,
            Self::Forum(channel) => Some(&channel.topic),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryTemplate {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<ChannelTemplate>,
    /// Applied to every channel in the category before the channel's own overwrites.
    #[serde(default)]
    pub permission_overwrites: Vec<PermissionOverwriteTemplate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_channel_variants() {
        let channels: Vec<ChannelTemplate> = serde_json::from_str(
            r#"[
                {"type": "text", "name": "welcome", "topic": "Hi"},
                {"type": "voice", "name": "lounge"},
                {"type": "forum", "name": "help", "tags": ["A", "B"], "require_tag": true}
            ]"#,
        )
        .unwrap();

        assert_eq!(channels[0].name(), "welcome");
        assert_eq!(channels[0].topic(), Some("Hi"));
        assert!(matches!(channels[1], ChannelTemplate::Voice(_)));
        assert_eq!(channels[1].topic(), None);
        match &channels[2] {
            ChannelTemplate::Forum(forum) => {
                assert_eq!(forum.tags, vec!["A", "B"]);
                assert!(forum.require_tag);
                assert_eq!(forum.topic, "");
            }
            other => panic!("expected forum, got {other:?}"),
        }
    }

    #[test]
    fn normalises_topic_and_messages() {
        let channel: ChannelTemplate = serde_json::from_str(
            r#"{
                "type": "text",
                "name": "rules",
                "topic": "\n    Be nice.\n",
                "channel_messages": ["\n  Rule one\n    detail\n  "]
            }"#,
        )
        .unwrap();

        let ChannelTemplate::Text(text) = channel else {
            panic!("expected text channel");
        };
        assert_eq!(text.topic, "Be nice.");
        assert_eq!(text.channel_messages, vec!["Rule one\n  detail"]);
    }

    #[test]
    fn rejects_unknown_channel_type() {
        let result =
            serde_json::from_str::<ChannelTemplate>(r#"{"type": "stage", "name": "talks"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn voice_channel_rejects_topic() {
        let result = serde_json::from_str::<ChannelTemplate>(
            r#"{"type": "voice", "name": "lounge", "topic": "chat"}"#,
        );

        assert!(result.is_err());
    }
}
