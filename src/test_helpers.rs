use crate::config::ConnectionConfig;

/// Config pointing at a local port nothing listens on, so connecting fails fast
/// with "connection refused" and no MySQL server is needed.
pub fn unreachable_config() -> ConnectionConfig {
    ConnectionConfig {
        db_host: "127.0.0.1".to_string(),
        db_port: 1,
        ..ConnectionConfig::default()
    }
}

/// Config for a live MySQL server, or `None` when `DB_HOST` is not configured.
/// Tests that need a real database skip themselves when this returns `None`.
pub fn live_config_from_env() -> Option<ConnectionConfig> {
    dotenvy::dotenv().ok();
    if std::env::var("DB_HOST").is_err() {
        eprintln!(
            "Skipping integration test: set DB_HOST (and DB_USER/DB_PASS/DB_NAME) to a reachable MySQL server"
        );
        return None;
    }
    Some(ConnectionConfig::from_env())
}
