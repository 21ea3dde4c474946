use std::sync::atomic::AtomicBool;

use serenity::all::{Context, EventHandler, GuildId, Ready};
use serenity::async_trait;
use tokio::sync::mpsc;

use crate::{error::reconcile::ReconcileError, model::guild::GuildConfig};

pub mod ready;

/// Outcome of the single reconciliation run of a bot session.
pub type Outcome = Result<(), ReconcileError>;

/// Discord bot event handler
pub struct Handler {
    pub guild_id: GuildId,
    pub config: GuildConfig,
    pub outcome: mpsc::Sender<Outcome>,
    /// Set once the reconciliation has been started.
    pub started: AtomicBool,
}

impl Handler {
    pub fn new(guild_id: GuildId, config: GuildConfig, outcome: mpsc::Sender<Outcome>) -> Self {
        Self {
            guild_id,
            config,
            outcome,
            started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(self, ctx, ready).await;
    }
}
