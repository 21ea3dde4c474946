use thiserror::Error;

use crate::{error::remote::RemoteError, remote::lookup::EntityKind};

/// Failure of a reconciliation run. Every variant aborts the remaining steps.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// A name from the configuration could not be resolved against the live guild.
    #[error("Could not find {kind} with name '{name}'")]
    NotFound { kind: EntityKind, name: String },

    /// The live guild is in a state the configuration cannot safely be applied to.
    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ReconcileError {
    pub fn not_found(kind: EntityKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}
