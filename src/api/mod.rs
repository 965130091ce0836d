mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::store::SharedStore;

pub use handlers::ApiError;
pub use middleware::CorsPolicy;

pub fn create_router(store: SharedStore, cors: CorsPolicy) -> Router {
    Router::new()
        // Habits
        .route(
            "/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/habits/{id}", get(handlers::get_habit))
        .route("/habits/{id}/complete", put(handlers::complete_habit))
        // Health
        .route("/health", get(handlers::health))
        .layer(axum::middleware::from_fn_with_state(
            Arc::new(cors),
            middleware::cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
