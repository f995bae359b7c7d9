//! Twitter API access.
//!
//! This module handles:
//! - OAuth 1.0a request signing
//! - Fetching follower ids and resolving users
//! - Sending direct messages

pub mod client;
pub mod oauth;

pub use client::TwitterClient;
pub use oauth::{OAuthCredentials, OAuthSigner};

use crate::types::{FollowerSnapshot, Result, UserInfo, UserRef};
use async_trait::async_trait;

/// Read access to an account's followers.
#[async_trait]
pub trait FollowerSource: Send + Sync {
    /// Fetch the current follower ids of `screen_name`.
    async fn fetch_followers(&self, screen_name: &str) -> Result<FollowerSnapshot>;

    /// Resolve a user id or screen name to an account.
    async fn resolve_user(&self, user: &UserRef) -> Result<UserInfo>;
}
