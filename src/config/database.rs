use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use super::ConnectionConfig;

/// Body sent to the client when the database cannot be reached.
pub const CONNECTION_FAILED_MESSAGE: &str = "Database connection failed";

/// The only failure the bootstrap knows about. Auth errors, unreachable hosts and
/// unknown schemas all collapse into it; the driver error is kept as the source
/// for logging and never shown to clients.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("{}", CONNECTION_FAILED_MESSAGE)]
    ConnectionFailed(#[source] sqlx::Error),
}

impl IntoResponse for DatabaseError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, CONNECTION_FAILED_MESSAGE).into_response()
    }
}

/// An open MySQL session owned by a single request.
///
/// Clones share the same session so it can ride along in request extensions.
#[derive(Clone)]
pub struct ConnectionHandle(Arc<Mutex<MySqlConnection>>);

impl ConnectionHandle {
    fn new(conn: MySqlConnection) -> Self {
        Self(Arc::new(Mutex::new(conn)))
    }

    /// Exclusive access to the underlying connection for running queries.
    pub async fn lock(&self) -> MutexGuard<'_, MySqlConnection> {
        self.0.lock().await
    }

    /// Round-trip to the server to check the session is still alive.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        self.lock().await.ping().await
    }

    /// Gracefully close the session. When other clones are still alive this is
    /// a no-op and the connection goes away with the last clone.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        match Arc::try_unwrap(self.0) {
            Ok(conn) => conn.into_inner().close().await,
            Err(_) => Ok(()),
        }
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("clones", &Arc::strong_count(&self.0))
            .finish()
    }
}

/// Open one connection to the database described by `config`.
///
/// There is no retry and no timeout beyond the driver default. On failure the
/// driver error is logged and wrapped in [`DatabaseError::ConnectionFailed`];
/// mapping that to a response is left to the caller.
pub async fn ensure_database_ready(config: &ConnectionConfig) -> Result<ConnectionHandle, DatabaseError> {
    match MySqlConnection::connect_with(&config.connect_options()).await {
        Ok(conn) => {
            tracing::debug!(
                host = %config.db_host,
                port = config.db_port,
                database = %config.db_name,
                "database connection established"
            );
            Ok(ConnectionHandle::new(conn))
        }
        Err(e) => {
            tracing::error!(
                host = %config.db_host,
                port = config.db_port,
                database = %config.db_name,
                user = %config.db_user,
                "failed to connect to the database: {}",
                e
            );
            Err(DatabaseError::ConnectionFailed(e))
        }
    }
}
