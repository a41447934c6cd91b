use feed_core::{ApiResponse, CODE_UNAUTHORIZED, Post};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use web_sys::RequestCredentials;

/// Пустое значение означает тот же origin, с которого загружена страница.
const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "",
};

#[derive(Debug, Clone)]
pub(crate) enum FetchError {
    Network(String),
    Decode(String),
    Unauthorized,
    Api { code: i64, message: String },
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Unauthorized => f.write_str("Unauthorized"),
            Self::Api { message, .. } => f.write_str(message),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_id: &'a str,
    password: &'a str,
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn with_session(builder: RequestBuilder) -> RequestBuilder {
    builder.credentials(RequestCredentials::Include)
}

async fn read_envelope<T: DeserializeOwned + Default>(response: Response) -> Result<T, FetchError> {
    if !response.ok() {
        return Err(FetchError::Api {
            code: i64::from(response.status()),
            message: "Server Error".to_string(),
        });
    }

    let envelope = response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|err| FetchError::Decode(err.to_string()))?;

    envelope.into_result().map_err(|(code, message)| {
        if code == CODE_UNAUTHORIZED {
            FetchError::Unauthorized
        } else {
            FetchError::Api { code, message }
        }
    })
}

pub(crate) async fn login(user_id: &str, password: &str) -> Result<(), FetchError> {
    let response = with_session(Request::post(&endpoint("/api/login")))
        .json(&LoginRequest { user_id, password })
        .map_err(|err| FetchError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;

    read_envelope::<()>(response).await
}

pub(crate) async fn logout() -> Result<(), FetchError> {
    let response = with_session(Request::post(&endpoint("/api/logout")))
        .send()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;

    read_envelope::<()>(response).await
}

pub(crate) async fn list_posts(from: Option<&str>) -> Result<Vec<Post>, FetchError> {
    let mut builder = with_session(Request::get(&endpoint("/api/posts")));
    if let Some(from) = from {
        builder = builder.query([("from", from)]);
    }

    let response = builder
        .send()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;

    read_envelope(response).await
}
