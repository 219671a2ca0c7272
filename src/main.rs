//! # Device Registry
//!
//! A user and device registry with device assignment rules.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Storage backend (PostgreSQL or in-memory)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use device_registry::config::Settings;
use device_registry::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    device_registry::telemetry::init_tracing();

    info!("Starting Device Registry...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.storage.backend,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
