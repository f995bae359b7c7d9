//! Core types and errors for the follower watcher.

use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while watching an account.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("API returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Request signing failed: {0}")]
    SigningError(String),
}

pub type Result<T> = std::result::Result<T, WatchError>;

/// Follower identifiers observed in one poll, in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowerSnapshot {
    pub ids: Vec<u64>,
}

impl FollowerSnapshot {
    pub fn new(ids: Vec<u64>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Linear membership test; no ordering or uniqueness is assumed.
    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }
}

impl From<Vec<u64>> for FollowerSnapshot {
    fn from(ids: Vec<u64>) -> Self {
        Self::new(ids)
    }
}

/// A reference to an account, either by numeric id or by screen name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserRef {
    Id(u64),
    ScreenName(String),
}

impl UserRef {
    /// Query parameter used by `users/show` for this reference.
    pub fn query_param(&self) -> (&'static str, String) {
        match self {
            UserRef::Id(id) => ("user_id", id.to_string()),
            UserRef::ScreenName(name) => ("screen_name", name.clone()),
        }
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRef::Id(id) => write!(f, "{}", id),
            UserRef::ScreenName(name) => write!(f, "@{}", name),
        }
    }
}

/// A resolved account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub id_str: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
}

/// Rate-limit window reported by the API on a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    /// Unix timestamp (seconds) at which the window resets.
    pub reset: i64,
}

impl RateLimit {
    /// Parse the `x-rate-limit-*` headers. Returns `None` if any is missing.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        Some(Self {
            limit: parse_header(headers, "x-rate-limit-limit")?,
            remaining: parse_header(headers, "x-rate-limit-remaining")?,
            reset: parse_header(headers, "x-rate-limit-reset")?,
        })
    }

    /// Reset time as an RFC 2822 date, or the raw timestamp if out of range.
    pub fn reset_display(&self) -> String {
        chrono::DateTime::from_timestamp(self.reset, 0)
            .map(|dt| dt.to_rfc2822())
            .unwrap_or_else(|| self.reset.to_string())
    }
}

fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Configuration for HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("followwatch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
