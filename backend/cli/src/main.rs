mod commands_cmd;
mod config_cmd;
mod resolve_cmd;
mod serve_cmd;
mod services;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lobbybot")]
#[command(about = "Discord bot that turns Steam profile links into lobby invites")]
#[command(version)]
struct Cli {
    /// Path to config.yaml (defaults to $LOBBYBOT_CONFIG_DIR or ~/.lobbybot/)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve slash commands
    Serve,
    /// Resolve a Steam URL to a lobby invite once and print the outcome
    Resolve {
        /// Direct `steam://joinlobby/...` link or Steam profile URL
        url: String,
    },
    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the slash commands the bot registers
    Commands,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets redacted
    Show,
    /// Validate the config and report problems
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| lobbybot_config::config_file_path(&lobbybot_config::config_dir()));

    match cli.command {
        Commands::Serve => serve_cmd::run(&config_path).await,
        Commands::Resolve { url } => resolve_cmd::run(&config_path, &url).await,
        Commands::Config { action: ConfigAction::Show } => config_cmd::show(&config_path).await,
        Commands::Config { action: ConfigAction::Check } => config_cmd::check(&config_path).await,
        Commands::Commands => commands_cmd::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_config_flag() {
        let cli = Cli::parse_from(["lobbybot", "resolve", "--config", "/tmp/c.yaml", "steam://joinlobby/1/2/3"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert!(matches!(cli.command, Commands::Resolve { ref url } if url == "steam://joinlobby/1/2/3"));
    }

    #[test]
    fn parses_config_subcommands() {
        let cli = Cli::parse_from(["lobbybot", "config", "check"]);
        assert!(matches!(cli.command, Commands::Config { action: ConfigAction::Check }));
    }
}
