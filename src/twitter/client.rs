//! Signed HTTP client for the Twitter v1.1 REST API.

use crate::config::Settings;
use crate::twitter::oauth::{encode, OAuthCredentials, OAuthSigner};
use crate::twitter::FollowerSource;
use crate::types::{
    FollowerSnapshot, HttpConfig, RateLimit, Result, UserInfo, UserRef, WatchError,
};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, trace};
use url::Url;

const FOLLOWER_IDS_PATH: &str = "/1.1/followers/ids.json";
const USERS_SHOW_PATH: &str = "/1.1/users/show.json";
const DIRECT_MESSAGE_PATH: &str = "/1.1/direct_messages/new.json";

/// `followers/ids` response body. Only the first page is read.
#[derive(Debug, Deserialize)]
struct FollowerIdsResponse {
    ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Twitter API client authorized as a single user.
pub struct TwitterClient {
    client: Client,
    signer: OAuthSigner,
    base_url: Url,
}

impl TwitterClient {
    /// Create a new client.
    pub fn new(credentials: OAuthCredentials, base_url: &str, config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(2);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            signer: OAuthSigner::new(credentials),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Create a client from the settings file.
    pub fn from_settings(settings: &Settings, config: &HttpConfig) -> Result<Self> {
        let credentials = OAuthCredentials {
            consumer_key: settings.consumer_key.clone(),
            consumer_secret: settings.consumer_secret.clone(),
            access_token: settings.access_token.clone(),
            access_secret: settings.access_secret.clone(),
        };
        Self::new(credentials, &settings.api_base_url, config)
    }

    /// Send a direct message to `recipient`.
    pub async fn send_direct_message(&self, recipient: &UserInfo, text: &str) -> Result<()> {
        let response = self
            .send(
                Method::POST,
                DIRECT_MESSAGE_PATH,
                &[("user_id", recipient.id_str.as_str()), ("text", text)],
            )
            .await?;
        check_status(response).await?;
        debug!("Direct message sent to @{}", recipient.screen_name);
        Ok(())
    }

    /// Sign and send a request. Parameters go into the query string.
    async fn send(&self, method: Method, path: &str, params: &[(&str, &str)]) -> Result<Response> {
        let mut url = self.base_url.join(path)?;
        let authorization = self
            .signer
            .authorization_header(method.as_str(), url.as_str(), params)?;

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        if !query.is_empty() {
            url.set_query(Some(&query));
        }

        trace!("{} {}", method, url);
        let response = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl FollowerSource for TwitterClient {
    async fn fetch_followers(&self, screen_name: &str) -> Result<FollowerSnapshot> {
        let response = self
            .send(Method::GET, FOLLOWER_IDS_PATH, &[("screen_name", screen_name)])
            .await?;
        let response = check_status(response).await?;

        match RateLimit::from_headers(response.headers()) {
            Some(rl) => info!(
                "Rate Limit: {}/{}, Rate Limit Reset: {} ({})",
                rl.remaining,
                rl.limit,
                rl.reset,
                rl.reset_display()
            ),
            None => debug!("No rate limit headers on followers response"),
        }

        let body = response.text().await?;
        let parsed: FollowerIdsResponse = serde_json::from_str(&body)?;
        debug!("Fetched {} follower ids for @{}", parsed.ids.len(), screen_name);
        Ok(FollowerSnapshot::new(parsed.ids))
    }

    async fn resolve_user(&self, user: &UserRef) -> Result<UserInfo> {
        let (key, value) = user.query_param();
        let response = self
            .send(Method::GET, USERS_SHOW_PATH, &[(key, value.as_str())])
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        let info: UserInfo = serde_json::from_str(&body)?;
        trace!("Resolved {} to @{}", user, info.screen_name);
        Ok(info)
    }
}

/// Turn a non-2xx response into [`WatchError::ApiError`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) if !parsed.errors.is_empty() => {
            let first = &parsed.errors[0];
            format!("{} (code {})", first.message, first.code)
        }
        _ => body,
    };
    Err(WatchError::ApiError {
        status: status.as_u16(),
        message,
    })
}
