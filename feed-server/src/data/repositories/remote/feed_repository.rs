use std::time::Duration;

use async_trait::async_trait;
use feed_core::Post;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::feed_repository::FeedRepository;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct HttpFeedRepository {
    client: Client,
    base_url: String,
}

impl HttpFeedRepository {
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    pub(crate) fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Self::CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub(crate) fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Debug, Serialize)]
struct SignInBody<'a> {
    id: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl FeedRepository for HttpFeedRepository {
    async fn sign_in(&self, user_id: &str, password: &str) -> Result<String, DomainError> {
        debug!(user_id, "signing in against upstream");
        let response = self
            .client
            .post(self.url("/api/signIn"))
            .json(&SignInBody {
                id: user_id,
                password,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        match serde_json::from_slice::<SignInResponse>(&body) {
            Ok(SignInResponse {
                message: Some(message),
                ..
            }) => Err(DomainError::InvalidCredentials(message)),
            Ok(SignInResponse {
                access_token: Some(token),
                ..
            }) if status.is_success() && !token.is_empty() => Ok(token),
            _ if !status.is_success() => Err(upstream_status(status)),
            Ok(_) => Err(DomainError::Unexpected(
                "sign in response has no access token".to_string(),
            )),
            Err(err) => Err(DomainError::Unexpected(format!(
                "malformed sign in response: {err}"
            ))),
        }
    }

    async fn home_posts(&self, token: &str, from: Option<&str>) -> Result<Vec<Post>, DomainError> {
        debug!(from = from.unwrap_or("-"), "fetching home page from upstream");
        let mut request = self.client.get(self.url("/api/home")).bearer_auth(token);
        if let Some(from) = from {
            request = request.query(&[("from_id", from)]);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_status(status));
        }

        response
            .json::<Vec<Post>>()
            .await
            .map_err(|err| DomainError::Unexpected(format!("malformed home response: {err}")))
    }
}

fn upstream_status(status: StatusCode) -> DomainError {
    warn!(status = status.as_u16(), "upstream request failed");
    DomainError::Upstream {
        status: status.as_u16(),
    }
}

fn map_transport_error(err: reqwest::Error) -> DomainError {
    warn!(error = %err, "upstream is unreachable");
    DomainError::Network(err.to_string())
}
