//! Outbound ports.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from_address: String,
    pub from_name: String,
    pub to_address: String,
    pub subject: String,
    pub body: String,
}

/// Delivers activation and reset-password emails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailGateway: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError>;
}
