//! The export command: GitHub stars into Pinboard.

use std::sync::Arc;

use gitboard::export::{ExportFailure, ExportResult, Exporter};
use gitboard::github::GitHubClient;
use gitboard::pinboard::PinboardClient;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, resolve_token};
use crate::progress::ProgressReporter;
use crate::shutdown;

/// Exit status used when the run was stopped with Ctrl+C.
pub(crate) const EXIT_CANCELLED: i32 = 130;

const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
const PINBOARD_TOKEN_ENV: &str = "PINBOARD_TOKEN";

#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct ExportArgs {
    /// GitHub personal access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Pinboard API token (user:HEX)
    #[arg(long, env = "PINBOARD_TOKEN", hide_env_values = true)]
    pub pinboard_token: Option<String>,

    /// Dry run - show what would be exported without creating bookmarks
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// How a failed export should end the process.
#[derive(Debug)]
pub(crate) struct CommandError {
    pub message: String,
    pub exit_code: i32,
}

impl CommandError {
    fn usage(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: 1,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CommandError {}

/// The line printed after a successful run.
pub(crate) fn summary_line(result: &ExportResult, dry_run: bool) -> String {
    if dry_run {
        format!(
            "Dry run: {} would add, {} skipped, {} total",
            result.added, result.skipped, result.total
        )
    } else {
        format!(
            "Done: {} added, {} skipped, {} total",
            result.added, result.skipped, result.total
        )
    }
}

/// Report a failed run with the counts reached before it stopped.
pub(crate) fn failure_error(failure: &ExportFailure) -> CommandError {
    let result = &failure.result;
    let counts = format!(
        "{} added, {} skipped, {} total",
        result.added, result.skipped, result.total
    );
    let counts = if result.is_complete() {
        counts
    } else {
        format!("{counts}, stopped after {}", result.processed())
    };
    if failure.error.is_cancelled() {
        CommandError {
            message: format!("Export cancelled ({counts})"),
            exit_code: EXIT_CANCELLED,
        }
    } else {
        CommandError {
            message: format!("Export failed: {} ({counts})", failure.error),
            exit_code: 1,
        }
    }
}

fn build_clients(
    config: &Config,
    github_token: &str,
    pinboard_token: &str,
) -> Result<(GitHubClient, PinboardClient), CommandError> {
    let mut github = GitHubClient::new(github_token)
        .map_err(|e| CommandError::usage(format!("Failed to create GitHub client: {e}")))?;
    if let Some(api_url) = &config.github.api_url {
        github = github.with_api_url(api_url.as_str());
    }

    let mut pinboard = PinboardClient::new(pinboard_token)
        .map_err(|e| CommandError::usage(format!("Failed to create Pinboard client: {e}")))?
        .with_min_delay(config.pinboard_min_delay());
    if let Some(api_url) = &config.pinboard.api_url {
        pinboard = pinboard.with_api_url(api_url.as_str());
    }

    Ok((github, pinboard))
}

/// Resolve both tokens, reading their env vars through `env`.
fn resolve_tokens(
    args: &ExportArgs,
    config: &Config,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(String, String), CommandError> {
    let github_token = resolve_token(
        args.github_token.clone(),
        env(GITHUB_TOKEN_ENV),
        config.github_token(),
    )
    .ok_or_else(|| {
        CommandError::usage("GitHub token is required: set GITHUB_TOKEN or use --github-token")
    })?;
    let pinboard_token = resolve_token(
        args.pinboard_token.clone(),
        env(PINBOARD_TOKEN_ENV),
        config.pinboard_token(),
    )
    .ok_or_else(|| {
        CommandError::usage(
            "Pinboard token is required: set PINBOARD_TOKEN or use --pinboard-token",
        )
    })?;
    Ok((github_token, pinboard_token))
}

pub(crate) async fn handle_export(args: ExportArgs, config: &Config) -> Result<(), CommandError> {
    let (github_token, pinboard_token) =
        resolve_tokens(&args, config, |key| std::env::var(key).ok())?;

    let (github, pinboard) = build_clients(config, &github_token, &pinboard_token)?;

    let cancel = CancellationToken::new();
    shutdown::setup_shutdown_handler(cancel.clone());

    let reporter = Arc::new(ProgressReporter::new(args.dry_run));
    let exporter = Exporter::new(github, pinboard)
        .with_dry_run(args.dry_run)
        .with_progress(reporter.as_callback());

    let outcome = exporter.run(&cancel).await;
    reporter.finish();

    match outcome {
        Ok(result) => {
            println!("{}", summary_line(&result, args.dry_run));
            Ok(())
        }
        Err(failure) => Err(failure_error(&failure)),
    }
}
