//! HTTP API
//!
//! Extractors, handlers and the route table.

pub mod extractors;
pub mod handlers;
pub mod routes;
