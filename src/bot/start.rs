use serenity::all::{Client, GatewayIntents, GuildId};
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    bot::handler::Handler, config::Config, error::AppError, model::guild::GuildConfig,
};

/// Connects to Discord, configures the guild once and disconnects.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `guild_id` - Guild to configure
/// - `guild_config` - Validated configuration to apply
///
/// # Returns
/// - `Ok(())` if the guild was configured
/// - `Err(AppError::ReconcileErr)` if a reconciliation step failed
/// - `Err(AppError::BotStopped)` if the gateway connection ended before an outcome
/// - `Err(AppError)` if the client could not be built or connected
pub async fn configure_guild(
    config: &Config,
    guild_id: GuildId,
    guild_config: GuildConfig,
) -> Result<(), AppError> {
    // Only guild structure is needed, no privileged intents
    let intents = GatewayIntents::GUILDS;

    let (sender, mut receiver) = mpsc::channel(1);
    let handler = Handler::new(guild_id, guild_config, sender);

    let mut client = Client::builder(&config.bot_token, intents)
        .event_handler(handler)
        .await?;
    let shard_manager = client.shard_manager.clone();

    info!("Starting Discord bot...");

    let outcome = tokio::select! {
        result = client.start() => {
            result?;
            None
        }
        outcome = receiver.recv() => outcome,
    };

    info!("Shutting down Discord bot");
    shard_manager.shutdown_all().await;

    match outcome {
        Some(result) => Ok(result?),
        None => Err(AppError::BotStopped),
    }
}
