//! Configuration file support for gitboard.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags, then `GITHUB_TOKEN` / `PINBOARD_TOKEN`
//! 2. Environment variables prefixed with `GITBOARD_` (e.g. `GITBOARD_PINBOARD__TOKEN`)
//! 3. Local config file (./gitboard.toml)
//! 4. XDG config file (~/.config/gitboard/config.toml)
//! 5. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."
//! api_url = "https://api.github.com"  # GitHub Enterprise: https://ghe.example.com/api/v3
//!
//! [pinboard]
//! token = "user:HEX"
//! api_url = "https://api.pinboard.in/v1"
//! min_delay_secs = 3
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub pinboard: PinboardConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Personal access token.
    pub token: Option<String>,
    /// REST API base URL.
    pub api_url: Option<String>,
}

/// Pinboard configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PinboardConfig {
    /// API token in `user:HEX` form.
    pub token: Option<String>,
    /// v1 API base URL.
    pub api_url: Option<String>,
    /// Minimum seconds between bookmark writes.
    pub min_delay_secs: u64,
}

impl Default for PinboardConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: None,
            min_delay_secs: gitboard::pinboard::DEFAULT_MIN_DELAY.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the config files and `GITBOARD_` environment.
    ///
    /// Falls back to defaults (with a warning) if the sources cannot be read.
    pub fn load() -> Self {
        let files = Self::default_config_path()
            .into_iter()
            .chain([PathBuf::from("gitboard.toml")])
            .filter(|path| path.exists());

        let mut builder = ConfigBuilder::builder();
        for path in files {
            tracing::debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        // GITBOARD_PINBOARD__MIN_DELAY_SECS -> pinboard.min_delay_secs
        let env = Environment::with_prefix("GITBOARD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);

        builder
            .add_source(env)
            .build()
            .and_then(|settings| settings.try_deserialize::<Config>())
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring invalid configuration");
                Config::default()
            })
    }

    pub fn github_token(&self) -> Option<String> {
        non_empty(self.github.token.clone())
    }

    pub fn pinboard_token(&self) -> Option<String> {
        non_empty(self.pinboard.token.clone())
    }

    /// Spacing between Pinboard writes.
    pub fn pinboard_min_delay(&self) -> Duration {
        Duration::from_secs(self.pinboard.min_delay_secs)
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gitboard").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Pick the first non-empty token from the flag, its env var, then config.
///
/// clap hands back an explicitly empty flag instead of the env var, so the
/// env value is passed in separately.
pub fn resolve_token(
    flag: Option<String>,
    env: Option<String>,
    configured: Option<String>,
) -> Option<String> {
    [flag, env, configured].into_iter().find_map(non_empty)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
