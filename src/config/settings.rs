//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::GlobalValues;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Access token / cookie settings
    pub auth: AuthSettings,

    /// Snowflake ID generator settings
    pub snowflake: SnowflakeSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Defaults seeded into the `globals` table on first start
    pub globals: GlobalSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Run embedded migrations at startup
    pub run_migrations: bool,
}

/// Access token and cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Name of the cookie carrying the access token
    pub cookie_name: String,

    /// Number of characters in a generated access token value
    pub token_length: usize,

    /// Mark the cookie `Secure` (HTTPS only)
    pub secure_cookie: bool,
}

/// Snowflake ID generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeSettings {
    /// Machine/worker ID (0-1023)
    pub machine_id: u16,

    /// Custom epoch timestamp in milliseconds
    pub epoch: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Which `globals` row this process reads and its seed values.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalSettings {
    /// `main` or `test`
    pub id: String,
    pub site_name: String,
    pub api_base_url: String,
    pub email_sender_address: String,
    pub email_sender_name: String,
}

/// Minimum access token length accepted from configuration
pub const MIN_TOKEN_LENGTH: usize = 32;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if the configured token length is too short.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("auth.cookie_name", "access_token")?
            .set_default("auth.token_length", 64)?
            .set_default("auth.secure_cookie", false)?
            .set_default("snowflake.machine_id", 1)?
            .set_default("snowflake.epoch", crate::shared::snowflake::FIREPLACE_EPOCH)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("globals.id", "main")?
            .set_default("globals.site_name", "Fireplace")?
            .set_default("globals.api_base_url", "http://localhost:5000")?
            .set_default("globals.email_sender_address", "no-reply@fireplace.local")?
            .set_default("globals.email_sender_name", "Fireplace")?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=5000 -> server.port = 5000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option(
                "snowflake.machine_id",
                std::env::var("SNOWFLAKE_MACHINE_ID").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| {
                if settings.auth.token_length < MIN_TOKEN_LENGTH {
                    return Err(ConfigError::Message(format!(
                        "auth.token_length must be at least {}. Current value: {}",
                        MIN_TOKEN_LENGTH, settings.auth.token_length
                    )));
                }
                Ok(settings)
            })
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl GlobalSettings {
    /// Values seeded into a `globals` row that does not exist yet.
    pub fn values(&self) -> GlobalValues {
        GlobalValues {
            site_name: self.site_name.clone(),
            api_base_url: self.api_base_url.clone(),
            email_sender_address: self.email_sender_address.clone(),
            email_sender_name: self.email_sender_name.clone(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            cookie_name: "access_token".into(),
            token_length: 64,
            secure_cookie: false,
        }
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            id: "main".into(),
            site_name: "Fireplace".into(),
            api_base_url: "http://localhost:5000".into(),
            email_sender_address: "no-reply@fireplace.local".into(),
            email_sender_name: "Fireplace".into(),
        }
    }
}
