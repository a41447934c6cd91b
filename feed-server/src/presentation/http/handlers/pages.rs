use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::infrastructure::session::{AuthCheck, Session, auth_check};
use crate::presentation::AppState;

const FEED_TITLE: &str = "Pill City";
const LOGIN_TITLE: &str = "Login / Pill City";

/// Лента. Без токена уводит на `/login`.
pub(crate) async fn feed_page(State(state): State<AppState>, session: Session) -> Response {
    match auth_check(&session) {
        AuthCheck::Authorized { .. } => page_shell(&state, FEED_TITLE),
        AuthCheck::Unauthorized => moved_permanently("/login"),
    }
}

/// Форма входа. С токеном уводит на ленту.
pub(crate) async fn login_page(State(state): State<AppState>, session: Session) -> Response {
    match auth_check(&session) {
        AuthCheck::Authorized { .. } => moved_permanently("/"),
        AuthCheck::Unauthorized => page_shell(&state, LOGIN_TITLE),
    }
}

fn moved_permanently(location: &'static str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, HeaderValue::from_static(location))],
    )
        .into_response()
}

fn page_shell(state: &AppState, title: &str) -> Response {
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/feed.css">
</head>
<body>
<script type="module">
import init from "/static/feed_wasm.js";
init();
</script>
</body>
</html>
"#
    );

    let mut response = Html(html).into_response();
    match HeaderValue::from_str(&content_security_policy(&state.image_domains)) {
        Ok(csp) => {
            response
                .headers_mut()
                .insert(header::CONTENT_SECURITY_POLICY, csp);
        }
        Err(err) => tracing::warn!(error = %err, "IMAGE_DOMAINS produce an invalid CSP header"),
    }
    response
}

pub(crate) fn content_security_policy(image_domains: &[String]) -> String {
    let mut img_src = String::from("img-src 'self' data:");
    for domain in image_domains {
        img_src.push_str(" https://");
        img_src.push_str(domain);
    }
    img_src
}
