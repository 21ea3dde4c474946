use thiserror::Error;

/// A configuration document that parsed but references things it does not declare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing channels: {}", .0.join(", "))]
    MissingChannels(Vec<String>),

    #[error("Missing roles: {}", .0.join(", "))]
    MissingRoles(Vec<String>),

    #[error("Duplicate {kind} name: '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// Discord only allows community features from verification level medium upwards.
    #[error("Community features require a verification level of at least medium")]
    VerificationLevelTooLow,

    #[error("Both 'system_channel' and 'system_channel_name' are set")]
    ConflictingSystemChannel,
}
