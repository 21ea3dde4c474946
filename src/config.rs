use crate::error::{config::ConfigError, AppError};

pub struct Config {
    pub bot_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            bot_token: std::env::var("BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("BOT_TOKEN".to_string()))?,
        })
    }
}
