use std::sync::Arc;
use std::time::Duration;

use feed_core::{ApiResponse, Post};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{FeedClientError, FeedClientResult};

const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequestDto<'a> {
    user_id: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct FeedQuery<'a> {
    from: &'a str,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для `/api` сервера `feed-server`.
///
/// Cookie `session` хранится во встроенном cookie store и уходит
/// со всеми следующими запросами.
pub(crate) struct HttpClient {
    base_url: Url,
    client: Client,
    jar: Arc<Jar>,
}

impl HttpClient {
    pub(crate) fn new(base_url: &str) -> FeedClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            FeedClientError::InvalidRequest(format!("invalid server url '{base_url}': {err}"))
        })?;

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url,
            client,
            jar,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Пара `session=...` из cookie store, если сессия есть.
    pub(crate) fn session_cookie(&self) -> Option<String> {
        let header = self.jar.cookies(&self.base_url)?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .map(str::trim)
            .find(|pair| {
                pair.split_once('=')
                    .is_some_and(|(name, value)| name == SESSION_COOKIE && !value.is_empty())
            })
            .map(str::to_string)
    }

    pub(crate) fn restore_session(&self, pair: &str) -> FeedClientResult<()> {
        let pair = pair.trim();
        match pair.split_once('=') {
            Some((SESSION_COOKIE, value)) if !value.is_empty() => {
                self.jar
                    .add_cookie_str(&format!("{pair}; Path=/"), &self.base_url);
                Ok(())
            }
            _ => Err(FeedClientError::InvalidRequest(format!(
                "expected '{SESSION_COOKIE}=<value>' cookie"
            ))),
        }
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> FeedClientResult<ApiResponse<T>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedClientError::from_http_status(status, &body));
        }
        Ok(response.json::<ApiResponse<T>>().await?)
    }

    pub(crate) async fn login(&self, user_id: &str, password: &str) -> FeedClientResult<()> {
        let response = self
            .client
            .post(self.endpoint("/api/login"))
            .json(&LoginRequestDto { user_id, password })
            .send()
            .await?;

        let envelope = Self::read_envelope::<()>(response).await?;
        envelope
            .into_result()
            .map_err(|(code, message)| FeedClientError::from_envelope(code, message))
    }

    pub(crate) async fn logout(&self) -> FeedClientResult<()> {
        let response = self.client.post(self.endpoint("/api/logout")).send().await?;

        let envelope = Self::read_envelope::<()>(response).await?;
        envelope
            .into_result()
            .map_err(|(code, message)| FeedClientError::from_envelope(code, message))
    }

    pub(crate) async fn list_posts(&self, from: Option<&str>) -> FeedClientResult<Vec<Post>> {
        let mut request = self.client.get(self.endpoint("/api/posts"));
        if let Some(from) = from {
            request = request.query(&FeedQuery { from });
        }

        let envelope = Self::read_envelope::<Vec<Post>>(request.send().await?).await?;
        envelope
            .into_result()
            .map_err(|(code, message)| FeedClientError::from_envelope(code, message))
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::{HeaderMap, header};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde::Deserialize;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::HttpClient;
    use crate::error::FeedClientError;

    #[derive(Deserialize)]
    struct PostsQuery {
        from: Option<String>,
    }

    async fn login(Json(body): Json<Value>) -> impl IntoResponse {
        if body["userId"] == "kusuou" && body["password"] == "right" {
            (
                [(header::SET_COOKIE, "session=opaque-1; Path=/; HttpOnly")],
                Json(json!({ "code": 0, "message": "success" })),
            )
                .into_response()
        } else {
            Json(json!({ "code": 1, "message": "Invalid id or password" })).into_response()
        }
    }

    async fn logout() -> impl IntoResponse {
        (
            [(header::SET_COOKIE, "session=; Path=/; Max-Age=0")],
            Json(json!({ "code": 0, "message": "success" })),
        )
    }

    async fn posts(headers: HeaderMap, Query(query): Query<PostsQuery>) -> Json<Value> {
        let has_session = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|cookie| cookie.contains("session=opaque-1"));
        if !has_session {
            return Json(json!({ "code": 401, "message": "Unauthorized" }));
        }

        let data = match query.from.as_deref() {
            None => json!([{ "id": "p1", "author": { "id": "a" }, "created_at_seconds": 1 }]),
            Some(_) => json!([]),
        };
        Json(json!({ "code": 0, "message": "success", "data": data }))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/posts", get(posts));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/").expect("client");
        assert_eq!(client.endpoint("/api/posts"), "http://localhost:8080/api/posts");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = HttpClient::new("not a url").expect_err("must fail");
        assert!(matches!(err, FeedClientError::InvalidRequest(_)));
    }

    #[test]
    fn restore_session_requires_session_pair() {
        let client = HttpClient::new("http://localhost:8080").expect("client");
        assert!(client.restore_session("other=1").is_err());
        assert!(client.restore_session("session=").is_err());

        client.restore_session("session=abc").expect("must restore");
        assert_eq!(client.session_cookie().as_deref(), Some("session=abc"));
    }

    #[tokio::test]
    async fn login_keeps_session_for_following_requests() {
        let client = HttpClient::new(&spawn_server().await).expect("client");

        let err = client.list_posts(None).await.expect_err("must fail");
        assert!(err.is_unauthorized());

        client.login("kusuou", "right").await.expect("login");
        assert_eq!(client.session_cookie().as_deref(), Some("session=opaque-1"));

        let first = client.list_posts(None).await.expect("first page");
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "p1");

        let next = client.list_posts(Some("p1")).await.expect("next page");
        assert!(next.is_empty());
    }

    #[tokio::test]
    async fn failed_login_surfaces_envelope_message() {
        let client = HttpClient::new(&spawn_server().await).expect("client");

        let err = client.login("kusuou", "wrong").await.expect_err("must fail");
        assert!(matches!(
            err,
            FeedClientError::Api { code: 1, ref message } if message == "Invalid id or password"
        ));
        assert!(client.session_cookie().is_none());
    }

    #[tokio::test]
    async fn logout_drops_session_cookie() {
        let client = HttpClient::new(&spawn_server().await).expect("client");
        client.login("kusuou", "right").await.expect("login");

        client.logout().await.expect("logout");
        assert!(client.session_cookie().is_none());
    }
}
