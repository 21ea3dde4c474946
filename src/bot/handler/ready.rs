//! Ready event handler running the reconciliation.
//!
//! The `ready` event fires after the bot authenticated and completed the gateway
//! handshake, which is the earliest point where the bot user id is known. It fires again
//! after reconnects; only the first one configures the guild.

use std::sync::atomic::Ordering;

use serenity::all::{Context, Ready};
use tracing::{debug, info, warn};

use crate::{
    bot::handler::Handler, remote::discord::SerenityGuild,
    service::configurator::GuildConfigurator,
};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `handler` - Event handler holding the target guild, its configuration and the
///   channel the outcome is reported on
/// - `ctx` - Discord context providing the HTTP client
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(handler: &Handler, ctx: Context, ready: Ready) {
    info!("{} is connected to Discord", ready.user.name);

    if handler.started.swap(true, Ordering::SeqCst) {
        return;
    }

    let remote = SerenityGuild::new(ctx.http.clone(), handler.guild_id, ready.user.id);
    let outcome = GuildConfigurator::new(&remote)
        .apply_configuration(&handler.config)
        .await;

    match &outcome {
        Ok(()) => info!("Guild {} configured", handler.guild_id),
        Err(e) => debug!("Configuration of guild {} stopped: {}", handler.guild_id, e),
    }

    if handler.outcome.send(outcome).await.is_err() {
        warn!("Configuration outcome was not received");
    }
}
