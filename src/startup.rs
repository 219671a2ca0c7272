//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::application::services::{
    DeviceService, DeviceServiceImpl, UserService, UserServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::UnitOfWork;
use crate::infrastructure::database::{self, PgUnitOfWork};
use crate::infrastructure::memory::MemoryUnitOfWork;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub unit_of_work: Arc<dyn UnitOfWork>,
    pub device_service: Arc<dyn DeviceService>,
    pub user_service: Arc<dyn UserService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the services with their default validation chains.
    pub fn new(unit_of_work: Arc<dyn UnitOfWork>, settings: Settings) -> Self {
        let device_service = Arc::new(DeviceServiceImpl::with_default_validators(
            unit_of_work.clone(),
        ));
        let user_service = Arc::new(UserServiceImpl::with_default_validators(
            unit_of_work.clone(),
            device_service.clone(),
        ));

        Self {
            unit_of_work,
            device_service,
            user_service,
            settings: Arc::new(settings),
        }
    }
}

/// Build the router with all middleware applied
pub fn build_router(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let unit_of_work = create_unit_of_work(&settings).await?;
        handlers::health::init_server_start();

        let addr = settings.server_addr();
        let router = build_router(AppState::new(unit_of_work, settings));

        // Bind to address
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Open the configured store
async fn create_unit_of_work(settings: &Settings) -> Result<Arc<dyn UnitOfWork>> {
    match settings.storage.backend {
        StorageBackend::Postgres => {
            let pool = database::create_pool(&settings.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            tracing::info!("Database connection pool created");

            if settings.database.run_migrations {
                database::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("Database migrations applied");
            }

            Ok(Arc::new(PgUnitOfWork::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Ok(Arc::new(MemoryUnitOfWork::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
