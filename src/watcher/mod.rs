//! The follower polling loop.
//!
//! A [`Watcher`] starts in [`WatchState::Initializing`]: it resolves the
//! monitored account and loads the first follower snapshot. Any failure there
//! is fatal. It then moves to [`WatchState::Polling`] and, every interval,
//! fetches the followers again, diffs them against the previous snapshot and
//! sends one notification per lost or gained follower.
//!
//! A failed fetch leaves the previous snapshot in place, so the next
//! successful cycle is compared against it. Followers that leave and return
//! between two successful fetches are never reported.

pub mod diff;

pub use diff::{diff_snapshots, SnapshotDiff};

use crate::notify::{self, Notification, Notifier};
use crate::twitter::FollowerSource;
use crate::types::{FollowerSnapshot, Result, UserInfo, UserRef};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`Watcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Initializing,
    Polling,
}

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The fetch failed; the previous snapshot was kept.
    Skipped { reason: String },
    /// The snapshot was replaced.
    Completed {
        lost: usize,
        gained: usize,
        notified: usize,
    },
}

/// Polls one account's followers and reports changes.
pub struct Watcher {
    source: Arc<dyn FollowerSource>,
    notifier: Arc<dyn Notifier>,
    screen_name: String,
    interval: Duration,
    notify_on_start: bool,
    state: WatchState,
    account: Option<UserInfo>,
    previous: FollowerSnapshot,
}

impl Watcher {
    /// Create a watcher for `screen_name`, polling every `interval`.
    pub fn new(
        source: Arc<dyn FollowerSource>,
        notifier: Arc<dyn Notifier>,
        screen_name: &str,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            screen_name: screen_name.to_string(),
            interval,
            notify_on_start: false,
            state: WatchState::Initializing,
            account: None,
            previous: FollowerSnapshot::default(),
        }
    }

    /// Send a notification once the initial snapshot is loaded.
    pub fn with_startup_notification(mut self, enabled: bool) -> Self {
        self.notify_on_start = enabled;
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn previous(&self) -> &FollowerSnapshot {
        &self.previous
    }

    /// The monitored account, once resolved.
    pub fn account(&self) -> Option<&UserInfo> {
        self.account.as_ref()
    }

    /// Resolve the monitored account and load the initial snapshot.
    pub async fn initialize(&mut self) -> Result<()> {
        let account = self
            .source
            .resolve_user(&UserRef::ScreenName(self.screen_name.clone()))
            .await
            .inspect_err(|e| error!("Error resolving @{}: {}", self.screen_name, e))?;
        debug!("Monitoring @{} (id {})", account.screen_name, account.id_str);

        let initial = self
            .source
            .fetch_followers(&self.screen_name)
            .await
            .inspect_err(|e| error!("Error getting initial followers: {}", e))?;
        info!("Initial followers updated: {} followers", initial.len());

        if self.notify_on_start {
            let note = notify::startup_message(&account, initial.len());
            if let Err(e) = self.notifier.notify(&account, &note).await {
                warn!("Startup notification failed: {}", e);
            }
        }

        self.previous = initial;
        self.account = Some(account);
        self.state = WatchState::Polling;
        Ok(())
    }

    /// Run one fetch, diff and notify cycle.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let Some(account) = self.account.clone() else {
            return CycleOutcome::Skipped {
                reason: "watcher is not initialized".to_string(),
            };
        };

        let current = match self.source.fetch_followers(&self.screen_name).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Error getting followers: {}", e);
                let note = notify::fetch_failed_message(&e);
                if let Err(notify_err) = self.notifier.notify(&account, &note).await {
                    warn!("Could not report fetch failure: {}", notify_err);
                }
                return CycleOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let changes = diff_snapshots(&self.previous, &current);
        if !changes.is_empty() {
            info!(
                "{} lost, {} gained since last check",
                changes.lost.len(),
                changes.gained.len()
            );
        }

        let mut notified = 0;
        for &id in &changes.lost {
            if self.announce(&account, id, notify::unfollowed_message).await {
                notified += 1;
            }
        }
        for &id in &changes.gained {
            if self.announce(&account, id, notify::followed_message).await {
                notified += 1;
            }
        }

        self.previous = current;
        info!("Previous followers updated ({} followers)", self.previous.len());

        CycleOutcome::Completed {
            lost: changes.lost.len(),
            gained: changes.gained.len(),
            notified,
        }
    }

    /// Resolve `id` and send the message built by `message`. Returns whether
    /// the notification went out.
    async fn announce(
        &self,
        account: &UserInfo,
        id: u64,
        message: fn(&UserInfo) -> Notification,
    ) -> bool {
        let user = match self.source.resolve_user(&UserRef::Id(id)).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Error getting user info [{}]: {}", id, e);
                return false;
            }
        };

        match self.notifier.notify(account, &message(&user)).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Notification for [{}] failed: {}", id, e);
                false
            }
        }
    }

    /// Initialize, then poll until `shutdown` completes.
    ///
    /// Shutdown is only observed while waiting between cycles.
    pub async fn run<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.initialize().await?;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping watcher");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.interval) => {}
            }

            if let CycleOutcome::Skipped { reason } = self.poll_once().await {
                debug!("Cycle skipped: {}", reason);
            }
        }
    }
}
