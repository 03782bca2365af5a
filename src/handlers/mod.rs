pub mod health;
pub mod reset;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::reset::ResetService;

/// Shared per-process state for the HTTP surface
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResetService>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(service: ResetService, jwt_secret: impl Into<Arc<str>>) -> Self {
        Self {
            service: Arc::new(service),
            jwt_secret: jwt_secret.into(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(health::health))
        // Protected
        .merge(reset_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn reset_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/reset", post(reset::manual_reset))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::jwt_auth_middleware,
        ))
}
