pub mod coach;
pub mod cohorts;
pub mod health;
pub mod metrics;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::state::AppState;

/// Maximum request body size: 256 KiB. Coaching dialogues are short.
const MAX_BODY_SIZE: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/metrics", metrics::router())
        .nest("/cohorts", cohorts::router())
        .nest("/coach", coach::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .with_state(state)
}
