//! Error types for configuration loading and guild reconciliation.
//!
//! `AppError` is the top-level error returned from the command entry points. It wraps the
//! domain errors of each layer so that `?` works across layer boundaries, and it is what
//! gets logged when a run fails.

pub mod config;
pub mod reconcile;
pub mod remote;
pub mod validation;

use thiserror::Error;

use crate::error::{
    config::ConfigError, reconcile::ReconcileError, remote::RemoteError,
    validation::ValidationError,
};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Environment or configuration file could not be loaded.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Configuration document parsed but is not internally consistent.
    ///
    /// Reported before any remote call is made.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// A reconciliation step failed and the run was aborted.
    #[error(transparent)]
    ReconcileErr(#[from] ReconcileError),

    /// Remote access outside of a reconciliation run, e.g. taking a snapshot for `plan`.
    #[error(transparent)]
    RemoteErr(#[from] RemoteError),

    /// Discord API or gateway error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Configuration document is not valid JSON for the configuration model.
    #[error("Invalid configuration document: {0}")]
    JsonErr(#[from] serde_json::Error),

    /// Logging could not be initialised.
    #[error("Failed to initialise logging: {0}")]
    LoggingErr(String),

    /// The gateway connection ended before the reconciliation reported an outcome.
    #[error("Discord connection closed before the guild was configured")]
    BotStopped,
}

/// Boxes the error to keep `AppError` small, serenity::Error is very large.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
