//! Colored console output for dry runs.

use crate::notify::{Notification, NotificationKind, Notifier};
use crate::types::{Result, UserInfo};
use async_trait::async_trait;
use colored::Colorize;

/// Prints notifications instead of sending them.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    /// Create a new console output handler.
    pub fn new() -> Self {
        Self
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        println!("{} {}", "[*]".bright_blue(), message);
    }

    fn format_notification(recipient: &UserInfo, notification: &Notification) -> String {
        let marker = match notification.kind {
            NotificationKind::Unfollowed => "[-]".red().bold(),
            NotificationKind::Followed => "[+]".green().bold(),
            NotificationKind::FetchFailed => "[!]".yellow().bold(),
            NotificationKind::Startup => "[*]".bright_blue(),
        };

        format!(
            "{} {} {}",
            marker,
            format!("@{}:", recipient.screen_name).dimmed(),
            notification.text
        )
    }
}

#[async_trait]
impl Notifier for ConsoleOutput {
    async fn notify(&self, recipient: &UserInfo, notification: &Notification) -> Result<()> {
        println!("{}", Self::format_notification(recipient, notification));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jack() -> UserInfo {
        UserInfo {
            id: 12,
            id_str: "12".to_string(),
            screen_name: "jack".to_string(),
            name: "Jack".to_string(),
        }
    }

    #[test]
    fn test_marker_follows_kind() {
        colored::control::set_override(false);
        assert_eq!(
            ConsoleOutput::format_notification(
                &jack(),
                &Notification::new(NotificationKind::Followed, "bob started following you!")
            ),
            "[+] @jack: bob started following you!"
        );
        assert_eq!(
            ConsoleOutput::format_notification(
                &jack(),
                &Notification::new(NotificationKind::Unfollowed, "bob stopped following you.")
            ),
            "[-] @jack: bob stopped following you."
        );
        // Wording does not pick the marker.
        assert_eq!(
            ConsoleOutput::format_notification(
                &jack(),
                &Notification::new(NotificationKind::FetchFailed, "bob started following you!")
            ),
            "[!] @jack: bob started following you!"
        );
    }

    #[tokio::test]
    async fn test_console_notify_never_fails() {
        let output = ConsoleOutput::new();
        let note = Notification::new(NotificationKind::Startup, "hello");
        assert!(output.notify(&jack(), &note).await.is_ok());
    }
}
