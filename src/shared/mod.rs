//! Shared Utilities
//!
//! Common utilities used across all layers.

pub mod error;
pub mod random;
pub mod snowflake;
pub mod validation;
