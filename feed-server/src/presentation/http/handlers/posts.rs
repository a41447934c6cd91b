use axum::{
    Json,
    extract::{Query, State},
};
use feed_core::{ApiResponse, Post};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::middleware::session::AuthenticatedSession;
use crate::presentation::http::openapi::PostsEnvelope;

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct FeedQuery {
    /// Id последнего поста предыдущей страницы.
    pub(crate) from: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(FeedQuery),
    responses(
        (status = 200, description = "code 0 with a page of posts (empty page ends the feed), 401 without a session, upstream status or 502 on upstream failure", body = PostsEnvelope)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    auth: AuthenticatedSession,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<ApiResponse<Vec<Post>>>> {
    let posts = state
        .feed_service
        .home_page(&auth.token, query.from.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(posts)))
}
