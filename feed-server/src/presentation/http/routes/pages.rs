use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::pages::{feed_page, login_page};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(feed_page))
        .route("/login", get(login_page))
}
