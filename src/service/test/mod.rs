use serde_json::{json, Value};
use serenity::all::{ChannelFlags, ChannelId, Colour, GuildId, Permissions, UserId};
use test_utils::{
    fixture::{BOT_USER_ID, GUILD_ID, HUMAN_USER_ID},
    serenity::{
        create_everyone_role, create_test_message, create_test_role, ChannelFactory,
        RoleFactory,
    },
};

use crate::{
    error::{reconcile::ReconcileError, remote::RemoteError, AppError},
    model::{
        guild::GuildConfig,
        level::{ContentFilter, Locale, NotificationLevel, VerificationLevel},
    },
    remote::{
        edit::{ChannelKind, EnableCommunity, GuildEdit, NewRole, RoleEdit},
        lookup::EntityKind,
        memory::{MemoryGuild, RemoteCall},
        GuildSettings, COMMUNITY_FEATURE,
    },
    service::configurator::GuildConfigurator,
};

mod guild;
mod message;
mod role;

/// Empty in-memory guild with the fixture guild and bot ids.
fn guild() -> Result<MemoryGuild, RemoteError> {
    MemoryGuild::new(GuildId::new(GUILD_ID), UserId::new(BOT_USER_ID))
}

/// Parses and converts a configuration document written with `json!`.
fn config(document: Value) -> Result<GuildConfig, AppError> {
    GuildConfig::from_json(&document.to_string())
}

/// Runs the full reconciliation pipeline against `remote`.
async fn apply(remote: &MemoryGuild, config: &GuildConfig) -> Result<(), ReconcileError> {
    GuildConfigurator::new(remote).apply_configuration(config).await
}

fn community_settings(verification_level: VerificationLevel) -> GuildSettings {
    GuildSettings {
        verification_level,
        features: vec![COMMUNITY_FEATURE.to_string()],
        ..GuildSettings::default()
    }
}
