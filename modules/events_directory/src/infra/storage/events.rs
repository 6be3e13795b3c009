//! In-memory event registry, ordered by id (and therefore by creation).

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::contract::model::{Event, EventId};
use crate::domain::error::DomainError;
use crate::domain::identity::IdSequence;
use crate::domain::repo::EventsRepository;

#[derive(Default)]
pub struct InMemoryEventsRepository {
    ids: IdSequence,
    events: RwLock<BTreeMap<EventId, Event>>,
}

impl InMemoryEventsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventsRepository for InMemoryEventsRepository {
    fn next_id(&self) -> EventId {
        EventId(self.ids.next_id())
    }

    fn insert(&self, event: Event) -> Result<(), DomainError> {
        let mut events = self.events.write();
        if events.contains_key(&event.id) {
            return Err(DomainError::duplicate_id("event", event.id.0));
        }
        events.insert(event.id, event);
        Ok(())
    }

    fn update(&self, event: Event) -> Result<(), DomainError> {
        let mut events = self.events.write();
        let current = events
            .get_mut(&event.id)
            .ok_or_else(|| DomainError::event_not_found(event.id))?;
        *current = event;
        Ok(())
    }

    fn remove(&self, id: EventId) -> Option<Event> {
        self.events.write().remove(&id)
    }

    fn find_by_id(&self, id: EventId) -> Option<Event> {
        self.events.read().get(&id).cloned()
    }

    fn list(&self) -> Vec<Event> {
        self.events.read().values().cloned().collect()
    }

    fn find_matching(&self, predicate: &dyn Fn(&Event) -> bool) -> Vec<Event> {
        self.events
            .read()
            .values()
            .filter(|event| predicate(*event))
            .cloned()
            .collect()
    }

    fn count(&self) -> usize {
        self.events.read().len()
    }
}
