mod bot;
mod cli;
mod config;
mod error;
mod logging;
mod model;
mod remote;
mod service;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serenity::all::{GuildId, Http};
use tracing::{error, info};

use crate::{
    cli::{Cli, Commands, GuildArgs},
    config::Config,
    error::AppError,
    model::{channel::ChannelTemplate, guild::GuildConfig},
    remote::{discord::SerenityGuild, memory::MemoryGuild},
    service::configurator::GuildConfigurator,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.debug) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Apply(args) => apply(&args).await,
        Commands::Plan(args) => plan(&args).await,
        Commands::Validate { config } => {
            GuildConfig::load(&config)?;
            println!("{} is valid", config.display());
            Ok(())
        }
    }
}

async fn apply(args: &GuildArgs) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let guild_config = GuildConfig::load(&args.config)?;

    bot::start::configure_guild(&config, GuildId::new(args.guild_id.get()), guild_config).await
}

/// Runs the reconciliation against a snapshot of the guild and prints the changes.
async fn plan(args: &GuildArgs) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let guild_config = GuildConfig::load(&args.config)?;

    let http = Arc::new(Http::new(&config.bot_token));
    let live = SerenityGuild::connect(http, GuildId::new(args.guild_id.get())).await?;

    // message history is only needed where messages are declared
    let history_of: Vec<&str> = guild_config
        .channels()
        .filter_map(|(_, channel)| match channel {
            ChannelTemplate::Text(text) if !text.channel_messages.is_empty() => {
                Some(text.name.as_str())
            }
            _ => None,
        })
        .collect();

    info!("Taking a snapshot of guild {}", args.guild_id);
    let snapshot = MemoryGuild::capture(&live, &history_of).await?;
    GuildConfigurator::new(&snapshot)
        .apply_configuration(&guild_config)
        .await?;

    let calls = snapshot.calls().await;
    if calls.is_empty() {
        println!("Guild is up to date");
    }
    for call in calls {
        println!("{call}");
    }

    Ok(())
}
