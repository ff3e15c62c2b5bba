use std::net::SocketAddr;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use pico_backend::config::ConnectionConfig;
use pico_backend::config::database::ensure_database_ready;
use pico_backend::create_app;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env file (if present)
    dotenv().ok();

    // Structured logs, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ConnectionConfig::from_env();
    tracing::info!(?config, "loaded connection configuration");

    // One probe at boot so a broken database shows up in the logs right away.
    // Requests keep answering 500 on their own until it comes back.
    match ensure_database_ready(&config).await {
        Ok(handle) => {
            tracing::info!("Successfully connected to the database");
            if let Err(e) = handle.close().await {
                tracing::warn!("failed to close startup probe connection: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("{}; requests will be answered with 500 until it is reachable", e);
        }
    }

    let app = create_app(config);

    let port: u16 = std::env::var("APP_PORT")
        .unwrap_or_else(|_| "3002".to_string())
        .parse()
        .map_err(|e| format!("APP_PORT must be a valid u16 number: {}", e))?;

    // Loopback unless APP_HOST says otherwise
    let host = std::env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("APP_HOST:APP_PORT must form a valid socket address: {}", e))?;

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app.into_make_service());

    let shutdown_signal = async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
    };

    tokio::select! {
        res = server => {
            res.map_err(|e| format!("Failed to serve application: {}", e))?;
        }
        _ = shutdown_signal => {
            tracing::info!("Shutdown requested; exiting");
        }
    };

    Ok(())
}
