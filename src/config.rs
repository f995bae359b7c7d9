//! Configuration handling: command-line flags and the JSON settings file.

use crate::types::{HttpConfig, Result, WatchError};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";

/// Longest accepted `RefreshTime`: one week, in minutes.
pub const MAX_REFRESH_TIME: u64 = 7 * 24 * 60;

/// Watches a Twitter account and DMs it whenever someone follows or unfollows.
#[derive(Parser, Debug, Clone)]
#[command(name = "followwatch")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the JSON settings file
    #[arg(short = 'c', long = "config", env = "FOLLOWWATCH_CONFIG", default_value = "./config.json")]
    pub config_path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print notifications to the console instead of sending DMs
    #[arg(long)]
    pub dry_run: bool,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Config {
    /// Get HTTP configuration from the command line.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout_secs: self.timeout,
            ..HttpConfig::default()
        }
    }
}

/// Contents of the settings file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,

    /// Minutes between follower checks.
    pub refresh_time: u64,
    /// Screen name of the account to monitor.
    pub username: String,

    /// Send a DM once the initial follower list has been loaded.
    #[serde(default)]
    pub notify_on_start: bool,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Settings {
    /// Read, parse and validate a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let credentials = [
            ("ConsumerKey", &self.consumer_key),
            ("ConsumerSecret", &self.consumer_secret),
            ("AccessToken", &self.access_token),
            ("AccessSecret", &self.access_secret),
        ];
        for (field, value) in credentials {
            if value.trim().is_empty() {
                return Err(WatchError::ConfigError(format!("{} must not be empty", field)));
            }
        }

        if self.refresh_time == 0 {
            return Err(WatchError::ConfigError(
                "RefreshTime must be at least 1 minute".to_string(),
            ));
        }
        if self.refresh_time > MAX_REFRESH_TIME {
            return Err(WatchError::ConfigError(format!(
                "RefreshTime must be at most {} minutes",
                MAX_REFRESH_TIME
            )));
        }

        if self.username.trim().trim_start_matches('@').is_empty() {
            return Err(WatchError::ConfigError("Username must not be empty".to_string()));
        }

        url::Url::parse(&self.api_base_url)?;

        Ok(())
    }

    /// Monitored screen name without a leading `@`.
    pub fn screen_name(&self) -> &str {
        self.username.trim().trim_start_matches('@')
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_time.saturating_mul(60))
    }
}
