use std::collections::BTreeMap;

use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use tracing::debug;

pub(crate) const SESSION_COOKIE_NAME: &str = "session";
pub(crate) const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone)]
pub(crate) struct SessionConfig {
    pub(crate) secure: bool,
    pub(crate) ttl_secs: u64,
}

/// Ключ шифрования cookie, выведенный из серверного секрета (>= 32 байт).
pub(crate) fn derive_cookie_key(secret: &str) -> Key {
    Key::derive_from(secret.as_bytes())
}

/// Данные сессии, которые хранятся в зашифрованной cookie `session`.
///
/// Изменения попадают в ответ только после [`Session::save`].
#[derive(Debug)]
pub(crate) struct Session {
    jar: PrivateCookieJar,
    values: BTreeMap<String, String>,
    config: SessionConfig,
}

impl Session {
    pub(crate) fn load(jar: PrivateCookieJar, config: SessionConfig) -> Self {
        let values = jar
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| match serde_json::from_str(cookie.value()) {
                Ok(values) => Some(values),
                Err(err) => {
                    debug!(error = %err, "ignoring malformed session payload");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            jar,
            values,
            config,
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Записывает сессию в cookie-jar ответа. Пустая сессия удаляет cookie.
    pub(crate) fn save(self) -> PrivateCookieJar {
        if self.values.is_empty() {
            return self
                .jar
                .remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
        }

        let payload = match serde_json::to_string(&self.values) {
            Ok(payload) => payload,
            Err(err) => {
                // BTreeMap<String, String> всегда сериализуется, ветка недостижима
                debug!(error = %err, "failed to serialize session");
                return self.jar;
            }
        };

        let ttl = i64::try_from(self.config.ttl_secs).unwrap_or(i64::MAX);
        let cookie = Cookie::build((SESSION_COOKIE_NAME, payload))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.secure)
            .max_age(cookie::time::Duration::seconds(ttl))
            .build();

        self.jar.add(cookie)
    }
}

/// Результат проверки сессии.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AuthCheck {
    Authorized { token: String },
    Unauthorized,
}

pub(crate) fn auth_check(session: &Session) -> AuthCheck {
    match session.get(TOKEN_KEY).map(str::trim) {
        Some(token) if !token.is_empty() => AuthCheck::Authorized {
            token: token.to_string(),
        },
        _ => AuthCheck::Unauthorized,
    }
}
