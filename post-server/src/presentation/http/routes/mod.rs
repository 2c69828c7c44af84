use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::health::health_checker;

pub(crate) mod posts;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/healthchecker", get(health_checker))
        .nest("/api/posts", posts::router(state.clone()))
        .with_state(state)
}
