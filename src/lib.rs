pub mod clients;
pub mod config;
pub mod routes;
pub mod handlers;
pub mod utils;
pub mod middlewares;
pub mod test_helpers;

pub mod app;

pub use app::create_app;
pub use config::ConnectionConfig;
pub use config::database::{ConnectionHandle, DatabaseError, ensure_database_ready};
