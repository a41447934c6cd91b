use std::sync::Arc;

use axum_extra::extract::cookie::Key;

use crate::application::auth_service::AuthService;
use crate::application::feed_service::FeedService;
use crate::data::feed_repository::FeedRepository;
use crate::infrastructure::session::{SessionConfig, derive_cookie_key};
use crate::infrastructure::settings::Settings;

pub(crate) mod http;

pub(crate) type SharedFeedRepository = Arc<dyn FeedRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<SharedFeedRepository>>,
    pub(crate) feed_service: Arc<FeedService<SharedFeedRepository>>,
    pub(crate) cookie_key: Key,
    pub(crate) session_config: SessionConfig,
    pub(crate) image_domains: Arc<[String]>,
}

impl AppState {
    pub(crate) fn new(repo: SharedFeedRepository, settings: &Settings) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(repo.clone())),
            feed_service: Arc::new(FeedService::new(repo)),
            cookie_key: derive_cookie_key(&settings.session_secret),
            session_config: SessionConfig {
                secure: settings.session_cookie_secure,
                ttl_secs: settings.session_ttl_secs,
            },
            image_domains: settings.image_domains.clone().into(),
        }
    }
}
