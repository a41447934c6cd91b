use axum::Router;

use crate::presentation::AppState;

pub(crate) mod auth;
pub(crate) mod pages;
pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/api", auth::router().merge(posts::router()))
        .merge(pages::router())
}
