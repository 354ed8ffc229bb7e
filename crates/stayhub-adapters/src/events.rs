use async_trait::async_trait;

use stayhub_core::events::DomainEvent;
use stayhub_ports::error::PortError;
use stayhub_ports::outbound::EventPublisher;

/// Emits each domain event as a structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
        for event in &events {
            let data = serde_json::to_string(event).map_err(|e| PortError::Decode(e.to_string()))?;
            tracing::info!(
                event_type = event.event_type(),
                booking_id = %event.booking_id(),
                occurred_at = %event.occurred_at().to_rfc3339(),
                data = %data,
                "domain event"
            );
        }
        Ok(())
    }
}
