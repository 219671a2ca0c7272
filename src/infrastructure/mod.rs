//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database connection pool, migrations and unit of work (PostgreSQL)
//! - Repository implementations (PostgreSQL)
//! - In-memory store used for local runs and tests
//! - Prometheus metrics

pub mod database;
pub mod memory;
pub mod metrics;
pub mod repositories;
