use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    describe_handler, fetch_handler, health_handler, search_handler, submit_handler,
    trending_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/submit", post(submit_handler))
                    .route("/search", get(search_handler))
                    .route("/fetch_top_trending", get(trending_handler))
                    .route("/fetch", get(fetch_handler))
                    .route("/description", post(describe_handler)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
