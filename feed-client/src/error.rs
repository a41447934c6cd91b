use feed_core::CODE_UNAUTHORIZED;
use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `feed-client`.
pub enum FeedClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Нет сессии или она истекла (конверт с кодом 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Сервер вернул конверт с ненулевым кодом.
    #[error("api error {code}: {message}")]
    Api {
        /// Код из конверта (1 для ошибок входа, статус удалённого API и т.п.).
        code: i64,
        /// Сообщение из конверта.
        message: String,
    },

    /// Некорректные параметры клиента.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `feed-client`.
pub type FeedClientResult<T> = Result<T, FeedClientError>;

impl FeedClientError {
    pub(crate) fn from_envelope(code: i64, message: String) -> Self {
        if code == CODE_UNAUTHORIZED {
            Self::Unauthorized
        } else {
            Self::Api { code, message }
        }
    }

    pub(crate) fn from_http_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("http status {status}")
        } else {
            body.trim().to_string()
        };
        Self::Api {
            code: i64::from(status.as_u16()),
            message,
        }
    }

    /// `true`, если ошибка означает отсутствие сессии.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
