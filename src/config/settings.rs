//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Persistence backend selection
    pub storage: StorageSettings,

    /// User listing defaults and limits
    pub pagination: PaginationSettings,

    /// CORS configuration
    pub cors: CorsSettings,

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

    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Persistence backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

/// Pagination configuration for listings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationSettings {
    /// Page size used when none (or zero) is requested
    pub default_size: u32,

    /// Largest page size a client may request
    pub max_size: u32,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

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
    /// or if the loaded values are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("storage.backend", "postgres")?
            .set_default("pagination.default_size", 10)?
            .set_default("pagination.max_size", 2000)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=8080 -> server.port = 8080
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
            .set_override_option("storage.backend", std::env::var("STORAGE_BACKEND").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| settings.validate().map(|_| settings))
    }

    /// Reject combinations that cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackend::Postgres && self.database.url.trim().is_empty()
        {
            return Err(ConfigError::Message(
                "database.url (or DATABASE_URL) is required for the postgres backend".into(),
            ));
        }

        let pagination = &self.pagination;
        if pagination.default_size == 0 || pagination.default_size > pagination.max_size {
            return Err(ConfigError::Message(format!(
                "pagination.default_size must be between 1 and {}, got {}",
                pagination.max_size, pagination.default_size
            )));
        }

        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// In-memory development settings.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 8080,
            },
            database: DatabaseSettings {
                url: String::new(),
                max_connections: 10,
                min_connections: 2,
                acquire_timeout: 30,
                run_migrations: false,
            },
            storage: StorageSettings {
                backend: StorageBackend::Memory,
            },
            pagination: PaginationSettings {
                default_size: 10,
                max_size: 2000,
            },
            cors: CorsSettings {
                allowed_origins: vec!["http://localhost:3000".into()],
            },
            environment: "development".into(),
        }
    }
}
