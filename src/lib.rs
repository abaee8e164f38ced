//! # Fireplace API Library
//!
//! This crate provides the Fireplace community server:
//! - RESTful HTTP API for users, communities, memberships and posts
//! - Cookie or bearer access tokens with per-login sessions
//! - Email activation and reset-password codes
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Models, value objects, validators and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, email and metrics implementations
//! - **Presentation Layer**: HTTP handlers, routes and middleware
//!
//! ## Module Structure
//!
//! ```text
//! fireplace_api/
//! +-- config/         Configuration management
//! +-- domain/         Models, value objects, validators and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, gateways and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, snowflake IDs, random codes)
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
