//! # Domain Layer
//!
//! The domain layer contains the core business rules of Fireplace.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **models**: Domain models and their repository traits
//! - **value_objects**: Typed ids and validated values
//! - **validators**: Presence and format checks over raw request input
//! - **gateways**: Outbound ports (email delivery)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Related models are only populated when explicitly included

pub mod gateways;
pub mod models;
pub mod validators;
pub mod value_objects;

// Re-export commonly used types
pub use models::*;
pub use value_objects::*;
