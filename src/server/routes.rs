use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::middleware::signature_middleware;
use super::AppState;

/// Create the webhook router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new().route("/health", get(handlers::health));

    // Signed deliveries only
    let webhook_routes = Router::new()
        .route(
            "/webhooks/work-orders",
            post(handlers::webhooks::receive_work_order_event),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            signature_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(webhook_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
