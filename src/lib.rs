//! # Device Registry Library
//!
//! This crate provides a registry of users and devices with:
//! - RESTful HTTP API endpoints
//! - Ordered validation chains for device creation and device assignment
//! - PostgreSQL or in-memory persistence behind one unit-of-work contract
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, repository traits and the unit of work
//! - **Application Layer**: Services, validation chains and DTOs
//! - **Infrastructure Layer**: PostgreSQL, in-memory store and metrics
//! - **Presentation Layer**: HTTP handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! device_registry/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, value objects, and traits
//! +-- application/    Application services, validators and DTOs
//! +-- infrastructure/ Database, memory store and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
