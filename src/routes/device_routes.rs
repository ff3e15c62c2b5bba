use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::device_handler::{control, status, text};

// Same paths as the device itself, so clients can point at either
pub fn device_routes() -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/control", post(control))
        .route("/api/text", post(text))
}
