use tracing::debug;

use crate::domain::events::DirectoryEvent;
use crate::domain::ports::EventPublisher;

/// Publisher that only records domain events in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl EventPublisher<DirectoryEvent> for TracingEventPublisher {
    fn publish(&self, event: &DirectoryEvent) {
        debug!(?event, "Domain event published");
    }
}
