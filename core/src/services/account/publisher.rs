//! Event publisher that only records events in the log

use async_trait::async_trait;

use crate::domain::events::AccountCreatedEvent;
use crate::errors::DomainError;

use super::traits::AccountEventPublisher;

/// Publishes account events as structured log lines
#[derive(Debug, Clone, Default)]
pub struct LoggingEventPublisher;

#[async_trait]
impl AccountEventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &AccountCreatedEvent) -> Result<(), DomainError> {
        tracing::info!(
            user_id = %event.user_id,
            username = %event.username,
            "Account created event"
        );
        Ok(())
    }
}
