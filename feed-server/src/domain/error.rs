use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Удалённый API отклонил вход; текст сообщения показывается пользователю.
    #[error("sign in rejected: {0}")]
    InvalidCredentials(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("upstream responded with status {status}")]
    Upstream { status: u16 },

    #[error("upstream is unreachable: {0}")]
    Network(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
