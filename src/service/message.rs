//! Bot-authored channel messages.
//!
//! A channel's history must consist of exactly the declared messages, sent by the bot. When
//! anything differs, every existing message is deleted and the declared ones are sent again
//! in order. Channels containing messages from anyone else are left untouched.

use serenity::all::{GuildChannel, Message, MessageId, UserId};
use tracing::{debug, info, warn};

use crate::{
    error::reconcile::ReconcileError,
    model::channel::{CategoryTemplate, ChannelTemplate},
    remote::{
        lookup::{EntityKind, GuildState},
        GuildRemote,
    },
    service::mention::insert_mentions_into_messages,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePlan {
    /// Someone other than the bot posted in the channel.
    ForeignContent,
    UpToDate,
    /// Delete these messages, then send the expected ones.
    Replace(Vec<MessageId>),
}

pub fn plan_messages(
    history: &[Message],
    bot_user_id: UserId,
    expected: &[String],
) -> MessagePlan {
    if history.iter().any(|message| message.author.id != bot_user_id) {
        return MessagePlan::ForeignContent;
    }

    let current = history.iter().map(|message| message.content.as_str());
    if current.eq(expected.iter().map(String::as_str)) {
        MessagePlan::UpToDate
    } else {
        MessagePlan::Replace(history.iter().map(|message| message.id).collect())
    }
}

pub struct MessageService<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> MessageService<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    pub async fn ensure_default_messages(
        &self,
        categories: &[CategoryTemplate],
    ) -> Result<(), ReconcileError> {
        info!("Ensure default messages");
        let state = GuildState::new(self.remote);

        for template in categories.iter().flat_map(|category| &category.channels) {
            let ChannelTemplate::Text(text) = template else {
                continue;
            };
            if text.channel_messages.is_empty() {
                continue;
            }

            let channel = state
                .find_channel(EntityKind::TextChannel, &text.name)
                .await?;
            let expected = insert_mentions_into_messages(&state, &text.channel_messages).await?;
            self.ensure_channel_messages(&channel, &expected).await?;
        }

        Ok(())
    }

    pub async fn ensure_channel_messages(
        &self,
        channel: &GuildChannel,
        expected: &[String],
    ) -> Result<(), ReconcileError> {
        info!("Ensure channel messages for channel {}", channel.name);
        let history = self.remote.messages(channel.id).await?;

        match plan_messages(&history, self.remote.bot_user_id(), expected) {
            MessagePlan::ForeignContent => {
                warn!(
                    "Channel {} has messages from non-bot users, skipping message creation",
                    channel.name
                );
            }
            MessagePlan::UpToDate => debug!("No update required"),
            MessagePlan::Replace(existing) => {
                for message in existing {
                    debug!("Deleting existing message");
                    self.remote.delete_message(channel.id, message).await?;
                }
                for content in expected {
                    debug!("Send new message");
                    self.remote.send_message(channel.id, content).await?;
                }
            }
        }

        Ok(())
    }
}
