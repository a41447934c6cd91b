use feed_core::Post;

use crate::data::feed_repository::FeedRepository;
use crate::domain::error::DomainError;

pub(crate) struct FeedService<R: FeedRepository> {
    repo: R,
}

impl<R: FeedRepository> FeedService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Страница ленты после поста `from`; пустой курсор означает первую страницу.
    pub(crate) async fn home_page(
        &self,
        token: &str,
        from: Option<&str>,
    ) -> Result<Vec<Post>, DomainError> {
        if token.trim().is_empty() {
            return Err(DomainError::Unauthorized);
        }
        let from = from.map(str::trim).filter(|cursor| !cursor.is_empty());
        self.repo.home_posts(token, from).await
    }
}
