use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::infrastructure::session::{AuthCheck, Session, auth_check};
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppError;

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        Ok(Session::load(jar, state.session_config.clone()))
    }
}

/// Сессия с действующим токеном. Без токена запрос отклоняется
/// конвертом `401` до обращения к удалённому API.
#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedSession {
    pub(crate) token: String,
}

impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await;
        match auth_check(&session) {
            AuthCheck::Authorized { token } => Ok(Self { token }),
            AuthCheck::Unauthorized => Err(AppError::Unauthorized),
        }
    }
}
