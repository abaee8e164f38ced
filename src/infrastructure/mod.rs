//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL) and their entity converters
//! - Outbound gateways (email)
//! - Prometheus metrics

pub mod converters;
pub mod database;
pub mod entities;
pub mod gateways;
pub mod metrics;
pub mod repositories;
