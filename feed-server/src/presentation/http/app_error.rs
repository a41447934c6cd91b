use axum::{
    Json,
    response::{IntoResponse, Response},
};
use feed_core::{ApiResponse, CODE_LOGIN_FAILED, CODE_UNAUTHORIZED};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::domain::error::DomainError;

const SERVER_ERROR: &str = "Server Error";
const NETWORK_FAILURE_CODE: i64 = 502;
const INTERNAL_ERROR_CODE: i64 = 500;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Первое сообщение валидации в порядке `fields`, затем любое оставшееся.
    pub(crate) fn from_validation(errors: &ValidationErrors, fields: &[&str]) -> Self {
        let field_errors = errors.field_errors();
        let ordered = fields
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .chain(field_errors.values());

        let message = ordered
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|msg| msg.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        Self::BadRequest(message)
    }

    fn envelope(&self) -> (i64, String) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { message, .. } => (CODE_LOGIN_FAILED, message.to_string()),
                DomainError::InvalidCredentials(message) => (CODE_LOGIN_FAILED, message.clone()),
                DomainError::Unauthorized => (CODE_UNAUTHORIZED, "Unauthorized".to_string()),
                DomainError::Upstream { status } => (i64::from(*status), SERVER_ERROR.to_string()),
                DomainError::Network(_) => (NETWORK_FAILURE_CODE, SERVER_ERROR.to_string()),
                DomainError::Unexpected(_) => (INTERNAL_ERROR_CODE, "Internal Error".to_string()),
            },
            AppError::BadRequest(message) => (CODE_LOGIN_FAILED, message.clone()),
            AppError::Unauthorized => (CODE_UNAUTHORIZED, "Unauthorized".to_string()),
        }
    }
}

/// Ошибки отдаются со статусом 200, результат передаётся полем `code` конверта.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Domain(DomainError::Unexpected(_))) {
            error!(error = %self, "request failed");
        }

        let (code, message) = self.envelope();
        Json(ApiResponse::<()>::failure(code, message)).into_response()
    }
}
