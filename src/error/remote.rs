use serenity::all::{ChannelId, MessageId, RoleId};
use thiserror::Error;

/// Failure of a single remote call.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(Box<serenity::Error>),

    #[error("Unknown role {0}")]
    UnknownRole(RoleId),

    #[error("Unknown channel {0}")]
    UnknownChannel(ChannelId),

    #[error("Unknown message {message} in channel {channel}")]
    UnknownMessage {
        channel: ChannelId,
        message: MessageId,
    },

    /// Discord returned a value this crate has no representation for.
    #[error("Unexpected {field} value: {value}")]
    UnexpectedValue { field: &'static str, value: String },

    #[error("Failed to decode Discord payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<serenity::Error> for RemoteError {
    fn from(err: serenity::Error) -> Self {
        RemoteError::Discord(Box::new(err))
    }
}
