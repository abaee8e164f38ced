//! API endpoint tests

mod community_tests;
mod error_tests;
mod health_tests;
mod post_tests;
mod user_tests;
