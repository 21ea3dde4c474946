//! CLI argument parsing using clap derive

use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Guild Configurator - Bring a Discord guild in line with a JSON configuration
#[derive(Parser, Debug)]
#[command(name = "guild-configurator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log every reconciliation step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every decision and remote call
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply the configuration to the guild
    ///
    /// Connects to the Discord gateway, reconciles once when the connection is ready and
    /// disconnects again.
    Apply(GuildArgs),

    /// Preview what apply would change
    ///
    /// Takes a snapshot of the guild over HTTP and prints every change apply would make,
    /// without modifying the guild.
    Plan(GuildArgs),

    /// Check a configuration file without contacting Discord
    Validate {
        /// Path to the JSON configuration document
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GuildArgs {
    /// Id of the guild to configure
    #[arg(short, long)]
    pub guild_id: NonZeroU64,

    /// Path to the JSON configuration document
    #[arg(short, long)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_apply_with_global_flags() {
        let cli = Cli::parse_from([
            "guild-configurator",
            "apply",
            "--guild-id",
            "1234",
            "--config",
            "guild.json",
            "--verbose",
        ]);

        assert!(cli.verbose);
        assert!(!cli.debug);
        assert_eq!(
            cli.command,
            Commands::Apply(GuildArgs {
                guild_id: NonZeroU64::new(1234).unwrap(),
                config: PathBuf::from("guild.json"),
            })
        );
    }

    #[test]
    fn rejects_zero_guild_id() {
        let result = Cli::try_parse_from([
            "guild-configurator",
            "plan",
            "--guild-id",
            "0",
            "--config",
            "guild.json",
        ]);

        assert!(result.is_err());
    }
}
