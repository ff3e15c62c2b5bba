use std::fmt;

use sqlx::mysql::MySqlConnectOptions;

/// Database bootstrap helpers
pub mod database;

pub const DEFAULT_PICO_URL: &str = "http://192.168.1.183";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_USER: &str = "pico";
pub const DEFAULT_DB_PASS: &str = "pico";
pub const DEFAULT_DB_NAME: &str = "pico";

/// Parameters identifying which MySQL server, schema and credentials to use.
///
/// Built once at startup and shared read-only with every request; a connection
/// attempt never mutates it.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Address of the pico device. Informational only, the connection logic ignores it.
    pub base_url: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PICO_URL.to_string(),
            db_host: DEFAULT_DB_HOST.to_string(),
            db_port: DEFAULT_DB_PORT,
            db_user: DEFAULT_DB_USER.to_string(),
            db_password: DEFAULT_DB_PASS.to_string(),
            db_name: DEFAULT_DB_NAME.to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Read `PICO_URL`, `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS` and `DB_NAME`
    /// from the environment. Unset variables keep their default value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConnectionConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let db_port = match lookup("DB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("DB_PORT={:?} is not a valid port, using {}", raw, DEFAULT_DB_PORT);
                DEFAULT_DB_PORT
            }),
            None => defaults.db_port,
        };

        Self {
            base_url: lookup("PICO_URL").unwrap_or(defaults.base_url),
            db_host: lookup("DB_HOST").unwrap_or(defaults.db_host),
            db_port,
            db_user: lookup("DB_USER").unwrap_or(defaults.db_user),
            db_password: lookup("DB_PASS").unwrap_or(defaults.db_password),
            db_name: lookup("DB_NAME").unwrap_or(defaults.db_name),
        }
    }

    /// Driver options for a single MySQL connection built from this config.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}

// Keep the password out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("base_url", &self.base_url)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"***")
            .field("db_name", &self.db_name)
            .finish()
    }
}
