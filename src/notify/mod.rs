//! Notification delivery.
//!
//! This module handles:
//! - Direct messages to the monitored account
//! - Colored console output for dry runs
//! - The text of every notification

pub mod console;
pub mod direct_message;

pub use console::ConsoleOutput;
pub use direct_message::DirectMessageNotifier;

use crate::types::{Result, UserInfo};
use async_trait::async_trait;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Unfollowed,
    Followed,
    FetchFailed,
    Startup,
}

/// A message for the monitored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Delivers a short text message to an account.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, recipient: &UserInfo, notification: &Notification) -> Result<()>;
}

pub fn unfollowed_message(user: &UserInfo) -> Notification {
    Notification::new(
        NotificationKind::Unfollowed,
        format!("{} stopped following you.", user.screen_name),
    )
}

pub fn followed_message(user: &UserInfo) -> Notification {
    Notification::new(
        NotificationKind::Followed,
        format!("{} started following you!", user.screen_name),
    )
}

pub fn fetch_failed_message(error: &dyn std::fmt::Display) -> Notification {
    Notification::new(
        NotificationKind::FetchFailed,
        format!("Error getting followers: {}", error),
    )
}

pub fn startup_message(account: &UserInfo, follower_count: usize) -> Notification {
    Notification::new(
        NotificationKind::Startup,
        format!(
            "Now watching {} followers of @{}.",
            follower_count, account.screen_name
        ),
    )
}
