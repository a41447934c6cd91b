use tracing::info;

use crate::data::feed_repository::FeedRepository;
use crate::domain::credentials::LoginRequest;
use crate::domain::error::DomainError;

pub(crate) struct AuthService<R: FeedRepository> {
    repo: R,
}

impl<R: FeedRepository> AuthService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Проверяет поля формы и получает токен у удалённого API.
    pub(crate) async fn login(&self, req: LoginRequest) -> Result<String, DomainError> {
        let req = req.validate()?;
        let token = self.repo.sign_in(&req.user_id, &req.password).await?;
        if token.trim().is_empty() {
            return Err(DomainError::Unexpected("upstream issued an empty token".to_string()));
        }

        info!(user_id = %req.user_id, "user signed in");
        Ok(token)
    }
}
