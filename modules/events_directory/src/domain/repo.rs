use crate::contract::model::{Event, EventId, User, UserId};
use crate::domain::error::DomainError;

/// Port for the domain layer: the user registry the service needs.
/// Implementations own their users exclusively; everything handed out is a copy.
pub trait UsersRepository: Send + Sync {
    /// Reserve a fresh id. Ids are never handed out twice.
    fn next_id(&self) -> UserId;
    /// Insert a fully-formed user. Rejects a duplicate id or email.
    fn insert(&self, user: User) -> Result<(), DomainError>;
    /// Replace the registered user with the same id. Rejects an email owned by another user.
    fn update(&self, user: User) -> Result<(), DomainError>;
    /// Remove by id, returning the removed user.
    fn remove(&self, id: UserId) -> Option<User>;
    fn find_by_id(&self, id: UserId) -> Option<User>;
    /// Case-insensitive email lookup.
    fn find_by_email(&self, email: &str) -> Option<User>;
    /// Snapshot of all users in insertion order.
    fn list(&self) -> Vec<User>;
    fn count(&self) -> usize;
}

/// Port for the domain layer: the event registry the service needs.
pub trait EventsRepository: Send + Sync {
    /// Reserve a fresh id. Ids are never handed out twice.
    fn next_id(&self) -> EventId;
    /// Insert a fully-formed event. Rejects a duplicate id.
    fn insert(&self, event: Event) -> Result<(), DomainError>;
    /// Replace the registered event with the same id.
    fn update(&self, event: Event) -> Result<(), DomainError>;
    fn remove(&self, id: EventId) -> Option<Event>;
    fn find_by_id(&self, id: EventId) -> Option<Event>;
    /// Snapshot of all events in insertion order.
    fn list(&self) -> Vec<Event>;
    /// Copies of the events accepted by `predicate`, in insertion order, taken from one
    /// consistent view of the registry.
    fn find_matching(&self, predicate: &dyn Fn(&Event) -> bool) -> Vec<Event>;
    fn count(&self) -> usize;
}
