use axum::{Router, routing::get};

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::list_posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/posts", get(list_posts))
}
