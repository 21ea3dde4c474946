use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot token is read from the environment or a `.env` file in the working directory.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Configuration document could not be read from disk.
    #[error("Failed to read configuration file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
