//! Direct-message notifications through the Twitter API.

use crate::notify::{Notification, Notifier};
use crate::twitter::TwitterClient;
use crate::types::{Result, UserInfo};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Sends each notification as a DM from the authorized account.
pub struct DirectMessageNotifier {
    client: Arc<TwitterClient>,
}

impl DirectMessageNotifier {
    pub fn new(client: Arc<TwitterClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for DirectMessageNotifier {
    async fn notify(&self, recipient: &UserInfo, notification: &Notification) -> Result<()> {
        self.client
            .send_direct_message(recipient, &notification.text)
            .await?;
        debug!("DM delivered: {}", notification.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use crate::twitter::OAuthCredentials;
    use crate::types::{HttpConfig, WatchError};
    use tracing_test::traced_test;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier(server: &MockServer) -> DirectMessageNotifier {
        let credentials = OAuthCredentials {
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "at".to_string(),
            access_secret: "as".to_string(),
        };
        let client = TwitterClient::new(credentials, &server.uri(), &HttpConfig::default()).unwrap();
        DirectMessageNotifier::new(Arc::new(client))
    }

    fn me() -> UserInfo {
        UserInfo {
            id: 12,
            id_str: "12".to_string(),
            screen_name: "jack".to_string(),
            name: "Jack".to_string(),
        }
    }

    #[tokio::test]
    async fn test_notify_sends_dm() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1.1/direct_messages/new.json"))
            .and(query_param("user_id", "12"))
            .and(query_param("text", "bob stopped following you."))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        notifier(&server)
            .notify(
                &me(),
                &Notification::new(NotificationKind::Unfollowed, "bob stopped following you."),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    #[traced_test]
    async fn test_notify_surfaces_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "errors": [{"code": 150, "message": "You cannot send messages to users who are not following you."}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = notifier(&server)
            .notify(&me(), &Notification::new(NotificationKind::Startup, "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, WatchError::ApiError { status: 403, .. }));
        assert!(!logs_contain("ERROR"));
        assert!(!logs_contain("WARN"));
    }
}
