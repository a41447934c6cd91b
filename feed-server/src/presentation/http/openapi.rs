use feed_core::Post;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::presentation::http::handlers::auth::LoginDto;

/// Конверт без данных (`/api/login`, `/api/logout`, ошибки).
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct EmptyEnvelope {
    /// 0 при успехе, 1 при ошибке входа, 401 без сессии, статус удалённого API при его сбое.
    pub(crate) code: i64,
    pub(crate) message: String,
}

/// Конверт страницы ленты.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostsEnvelope {
    pub(crate) code: i64,
    pub(crate) message: String,
    /// Присутствует только при `code == 0`.
    pub(crate) data: Option<Vec<Post>>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "pill-feed", description = "Session-backed proxy to the pill.city feed API"),
    paths(
        crate::presentation::http::handlers::auth::login,
        crate::presentation::http::handlers::auth::logout,
        crate::presentation::http::handlers::posts::list_posts
    ),
    components(schemas(LoginDto, EmptyEnvelope, PostsEnvelope, Post, feed_core::Author)),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "posts", description = "Home feed pages")
    )
)]
pub(crate) struct ApiDoc;
