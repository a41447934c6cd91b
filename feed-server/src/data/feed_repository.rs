use async_trait::async_trait;
use feed_core::Post;

use crate::domain::error::DomainError;

/// Доступ к удалённому API ленты.
#[async_trait]
pub(crate) trait FeedRepository: Send + Sync {
    /// Обменивает логин и пароль на bearer-токен.
    async fn sign_in(&self, user_id: &str, password: &str) -> Result<String, DomainError>;

    /// Одна страница домашней ленты; `from` это id последнего поста предыдущей страницы.
    async fn home_posts(&self, token: &str, from: Option<&str>) -> Result<Vec<Post>, DomainError>;
}

#[async_trait]
impl<R: FeedRepository + ?Sized> FeedRepository for std::sync::Arc<R> {
    async fn sign_in(&self, user_id: &str, password: &str) -> Result<String, DomainError> {
        (**self).sign_in(user_id, password).await
    }

    async fn home_posts(&self, token: &str, from: Option<&str>) -> Result<Vec<Post>, DomainError> {
        (**self).home_posts(token, from).await
    }
}
