use std::sync::Arc;

use axum::{Extension, Router, middleware};
use tower_http::trace::TraceLayer;

use crate::clients::pico_client::PicoClient;
use crate::config::ConnectionConfig;
use crate::middlewares::startup_guard::startup_guard;

/// All application routes, without the database guard or shared extensions.
pub fn build_router() -> Router {
    Router::new()
        .merge(crate::routes::health_routes::health_routes())
        .merge(crate::routes::device_routes::device_routes())
}

/// Full application: every route sits behind the per-request database guard.
pub fn create_app(config: ConnectionConfig) -> Router {
    let pico = PicoClient::new(&config.base_url);
    let config = Arc::new(config);

    build_router()
        .layer(middleware::from_fn_with_state(config.clone(), startup_guard))
        .layer(Extension(config))
        .layer(Extension(pico))
        // NOTE: outermost so the request span also covers the guard
        .layer(TraceLayer::new_for_http())
}
