//! followwatch - follow/unfollow notifications for a Twitter account.
//!
//! This library provides the pieces of a small polling service:
//! - Loading credentials and settings from a JSON file
//! - OAuth 1.0a signed access to the Twitter v1.1 API
//! - Diffing follower snapshots between polls
//! - Sending one direct message per gained or lost follower
//!
//! # Example
//!
//! ```no_run
//! use followwatch::config::Settings;
//! use followwatch::notify::DirectMessageNotifier;
//! use followwatch::twitter::TwitterClient;
//! use followwatch::types::HttpConfig;
//! use followwatch::watcher::Watcher;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings::load(Path::new("config.json")).unwrap();
//!     let client = Arc::new(TwitterClient::from_settings(&settings, &HttpConfig::default()).unwrap());
//!     let notifier = Arc::new(DirectMessageNotifier::new(client.clone()));
//!     let watcher = Watcher::new(client, notifier, settings.screen_name(), settings.refresh_interval());
//!     watcher.run(std::future::pending()).await.unwrap();
//! }
//! ```

pub mod config;
pub mod notify;
pub mod twitter;
pub mod types;
pub mod watcher;

pub use config::{Config, Settings};
pub use notify::{ConsoleOutput, DirectMessageNotifier, Notification, NotificationKind, Notifier};
pub use twitter::{FollowerSource, TwitterClient};
pub use types::{FollowerSnapshot, Result, UserInfo, UserRef, WatchError};
pub use watcher::{CycleOutcome, SnapshotDiff, WatchState, Watcher};
