//! Gitboard CLI - export GitHub stars to Pinboard.

mod commands;
mod config;
mod progress;
mod shutdown;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

use crate::commands::export::ExportArgs;

#[derive(Parser)]
#[command(name = "gitboard")]
#[command(version)]
#[command(about = "Export GitHub starred repositories to Pinboard")]
#[command(
    long_about = "Gitboard saves every repository you have starred on GitHub as a private \
Pinboard bookmark tagged github-repo plus the repository's topics. Repositories that \
are already bookmarked are skipped, so it is safe to run repeatedly."
)]
#[command(after_long_help = r#"EXAMPLES
    Export all starred repositories:
        $ gitboard

    See what would be exported:
        $ gitboard --dry-run

    Generate shell completions:
        $ gitboard completions bash > ~/.local/share/bash-completion/completions/gitboard

CONFIGURATION
    Gitboard reads configuration from:
      1. ~/.config/gitboard/config.toml (or $XDG_CONFIG_HOME/gitboard/config.toml)
      2. ./gitboard.toml
      3. Environment variables (GITBOARD_* prefix, e.g. GITBOARD_PINBOARD__MIN_DELAY_SECS)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GITHUB_TOKEN                        GitHub personal access token
    PINBOARD_TOKEN                      Pinboard API token (user:HEX)
    GITBOARD_GITHUB__API_URL            GitHub API base URL
    GITBOARD_PINBOARD__API_URL          Pinboard API base URL
    GITBOARD_PINBOARD__MIN_DELAY_SECS   Seconds between Pinboard writes (default: 3)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Structured logging when not attached to a terminal
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("gitboard=info,gitboard_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        commands::meta::handle_completions(shell)?;
        return Ok(());
    }

    if let Err(e) = commands::export::handle_export(cli.export, &config).await {
        tracing::error!(error = %e, "Export did not complete");
        eprintln!("{e}");
        std::process::exit(e.exit_code);
    }

    Ok(())
}
