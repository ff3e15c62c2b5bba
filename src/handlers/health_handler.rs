use std::sync::Arc;

use crate::config::ConnectionConfig;
use crate::config::database::ConnectionHandle;
use crate::utils::response::{ApiResponse, HandlerResult};
use axum::{Extension, Json, http::StatusCode};
use serde_json::json;

pub async fn health(
    Extension(conn): Extension<ConnectionHandle>,
    Extension(config): Extension<Arc<ConnectionConfig>>,
) -> HandlerResult {
    // The guard already connected; make sure the session actually answers queries
    let res: Result<i64, sqlx::Error> = {
        let mut db = conn.lock().await;
        sqlx::query_scalar("SELECT 1").fetch_one(&mut *db).await
    };

    match res {
        Ok(_) => {
            let data = json!({ "db": "ok", "pico_url": config.base_url });
            let response = ApiResponse::ok("OK", data);
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => {
            tracing::error!("health probe query failed: {}", e);
            let response = ApiResponse::error("Unhealthy", json!({ "db": "error" }));
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}
