use crate::contract::{
    error::DirectoryError,
    model::{Event, EventId, FilterSpec, User, UserId},
    requests::{EventPatch, LoginRequest, NewEventRequest, RegisterUserRequest, UserPatch},
};

/// Public API of the events directory for in-process callers (UI layer, tests).
///
/// Lookups return `None` on a miss; only rejected requests produce a `DirectoryError`.
pub trait EventsDirectoryApi: Send + Sync {
    /// Register a new user
    fn register_user(&self, request: RegisterUserRequest) -> Result<User, DirectoryError>;

    /// Check credentials and return the matching enabled user
    fn authenticate(&self, request: LoginRequest) -> Result<User, DirectoryError>;

    fn get_user(&self, id: UserId) -> Option<User>;

    /// All users in registration order
    fn list_users(&self) -> Vec<User>;

    /// Update a user with partial data
    fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, DirectoryError>;

    fn set_user_enabled(&self, id: UserId, enabled: bool) -> Result<User, DirectoryError>;

    /// Remove a user together with the events they organize. False if unknown.
    fn remove_user(&self, id: UserId) -> bool;

    /// Create an event organized by an existing user
    fn create_event(&self, request: NewEventRequest) -> Result<Event, DirectoryError>;

    fn get_event(&self, id: EventId) -> Option<Event>;

    /// All events in creation order
    fn list_events(&self) -> Vec<Event>;

    /// Update an event with partial data
    fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Event, DirectoryError>;

    /// Remove an event and every reference to it. False if unknown.
    fn remove_event(&self, id: EventId) -> bool;

    fn join_event(&self, user: UserId, event: EventId) -> Result<Event, DirectoryError>;

    fn leave_event(&self, user: UserId, event: EventId) -> Result<bool, DirectoryError>;

    /// Events matching the filter, in creation order
    fn filter_events(&self, filter: &FilterSpec) -> Vec<Event>;

    /// Events matching the user's theme affinities
    fn events_for_user(&self, user: UserId) -> Result<Vec<Event>, DirectoryError>;

    /// Events the user organizes, in the order they were created
    fn organized_events(&self, user: UserId) -> Result<Vec<Event>, DirectoryError>;

    /// Events the user has joined, in the order they were joined
    fn participating_events(&self, user: UserId) -> Result<Vec<Event>, DirectoryError>;
}
