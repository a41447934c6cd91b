//! Клиентская библиотека для `/api` сервера `feed-server`.
//!
//! [`FeedClient`] входит в систему, хранит cookie сессии и читает
//! домашнюю ленту постранично. Клиент реализует [`PageSource`], поэтому
//! его можно передать в [`feed_core::Pager::load_next`].
#![warn(missing_docs)]

mod error;
mod http_client;

pub use error::{FeedClientError, FeedClientResult};
pub use feed_core::{Author, Post};

use async_trait::async_trait;
use feed_core::{PageKey, PageSource};
use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент ленты поверх HTTP.
pub struct FeedClient {
    http: HttpClient,
}

impl FeedClient {
    /// Создаёт клиент для сервера с базовым URL, например `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> FeedClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
        })
    }

    /// Входит в систему. При успехе сервер выставляет cookie сессии,
    /// клиент запоминает её.
    ///
    /// Ошибка входа приходит как [`FeedClientError::Api`] с кодом 1.
    pub async fn login(&self, user_id: &str, password: &str) -> FeedClientResult<()> {
        self.http.login(user_id, password).await
    }

    /// Удаляет токен из сессии на сервере.
    pub async fn logout(&self) -> FeedClientResult<()> {
        self.http.logout().await
    }

    /// Страница ленты после поста `from` (`None` для первой страницы).
    ///
    /// Пустой вектор означает, что лента закончилась.
    pub async fn list_posts(&self, from: Option<&str>) -> FeedClientResult<Vec<Post>> {
        self.http.list_posts(from).await
    }

    /// Текущая cookie сессии в виде `session=<value>`, чтобы сохранить её между запусками.
    pub fn session_cookie(&self) -> Option<String> {
        self.http.session_cookie()
    }

    /// Восстанавливает сессию из строки, полученной от [`FeedClient::session_cookie`].
    pub fn restore_session(&self, cookie: &str) -> FeedClientResult<()> {
        self.http.restore_session(cookie)
    }
}

#[async_trait]
impl PageSource<Post> for FeedClient {
    type Error = FeedClientError;

    async fn fetch_page(&self, key: &PageKey) -> Result<Vec<Post>, Self::Error> {
        self.list_posts(key.cursor()).await
    }
}
