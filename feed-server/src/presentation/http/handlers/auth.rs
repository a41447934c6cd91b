use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use feed_core::ApiResponse;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::credentials::LoginRequest;
use crate::infrastructure::session::{Session, TOKEN_KEY};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::openapi::EmptyEnvelope;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginDto {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID is required"))]
    pub(crate) user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub(crate) password: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "code 0 sets the session cookie, code 1 carries the failure message", body = EmptyEnvelope)
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    mut session: Session,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> AppResult<(PrivateCookieJar, Json<ApiResponse<()>>)> {
    let Json(dto) = payload.map_err(|err| AppError::BadRequest(err.body_text()))?;
    dto.validate()
        .map_err(|errors| AppError::from_validation(&errors, &["user_id", "password"]))?;

    let token = state
        .auth_service
        .login(LoginRequest {
            user_id: dto.user_id,
            password: dto.password,
        })
        .await?;

    session.set(TOKEN_KEY, token);
    Ok((session.save(), Json(ApiResponse::ok())))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Token removed from the session", body = EmptyEnvelope)
    )
)]
pub(crate) async fn logout(mut session: Session) -> (PrivateCookieJar, Json<ApiResponse<()>>) {
    session.remove(TOKEN_KEY);
    (session.save(), Json(ApiResponse::ok()))
}
