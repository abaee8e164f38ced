//! Outbound Gateways
//!
//! Implementations of the ports in `domain::gateways`.

use async_trait::async_trait;

use crate::domain::gateways::{EmailGateway, OutgoingEmail};
use crate::shared::error::AppError;

/// Writes every outgoing email to the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEmailGateway;

#[async_trait]
impl EmailGateway for LoggingEmailGateway {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        tracing::info!(
            from = %email.from_address,
            to = %email.to_address,
            subject = %email.subject,
            body = %email.body,
            "Email sent"
        );
        Ok(())
    }
}
