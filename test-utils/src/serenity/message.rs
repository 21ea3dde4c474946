//! Test factory for creating Serenity Message and User objects.

use serenity::all::{Message, User};

use crate::fixture::{next_id, BOT_USER_ID};

/// Creates a test Serenity User.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Username
///
/// # Returns
/// - `User` - A valid Serenity User struct; flagged as a bot when `user_id` is
///   [`BOT_USER_ID`]
pub fn create_test_user(user_id: u64, username: &str) -> User {
    serde_json::from_value(user_json(user_id, username))
        .expect("Failed to create test user - invalid JSON structure")
}

fn user_json(user_id: u64, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0000",
        "avatar": null,
        "bot": user_id == BOT_USER_ID,
    })
}

/// Creates a test message with a fresh id.
///
/// # Arguments
/// - `channel_id` - Channel the message was posted in
/// - `author_id` - User id of the author
/// - `content` - Message text
///
/// # Returns
/// - `Message` - A valid Serenity Message struct for testing
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::{fixture::HUMAN_USER_ID, serenity::create_test_message};
///
/// let message = create_test_message(channel.id.get(), HUMAN_USER_ID, "hello");
/// assert!(!message.author.bot);
/// ```
pub fn create_test_message(channel_id: u64, author_id: u64, content: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": next_id().to_string(),
        "channel_id": channel_id.to_string(),
        "author": user_json(author_id, "member"),
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
        "flags": 0,
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
