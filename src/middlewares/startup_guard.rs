use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::config::ConnectionConfig;
use crate::config::database::{DatabaseError, ensure_database_ready};

/// Open the request's database connection before any handler runs.
///
/// If the connection cannot be opened the request stops here with the fixed
/// `500 Database connection failed` response. Otherwise the [`ConnectionHandle`]
/// is placed in the request extensions and closed once the handler is done.
///
/// [`ConnectionHandle`]: crate::config::database::ConnectionHandle
pub async fn startup_guard(
    State(config): State<Arc<ConnectionConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, DatabaseError> {
    let handle = ensure_database_ready(&config).await?;
    req.extensions_mut().insert(handle.clone());

    let response = next.run(req).await;

    if let Err(e) = handle.close().await {
        tracing::warn!("startup_guard: failed to close database connection: {}", e);
    }

    Ok(response)
}
