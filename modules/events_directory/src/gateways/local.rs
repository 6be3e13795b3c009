use std::sync::Arc;

use crate::contract::{
    client::EventsDirectoryApi,
    error::DirectoryError,
    model::{Event, EventId, FilterSpec, User, UserId},
    requests::{EventPatch, LoginRequest, NewEventRequest, RegisterUserRequest, UserPatch},
};
use crate::domain::service::Service;

/// Local implementation of the EventsDirectoryApi trait that delegates to the domain service
pub struct EventsDirectoryLocalClient {
    service: Arc<Service>,
}

impl EventsDirectoryLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

impl EventsDirectoryApi for EventsDirectoryLocalClient {
    fn register_user(&self, request: RegisterUserRequest) -> Result<User, DirectoryError> {
        self.service.register_user(request).map_err(Into::into)
    }

    fn authenticate(&self, request: LoginRequest) -> Result<User, DirectoryError> {
        self.service.authenticate(request).map_err(Into::into)
    }

    fn get_user(&self, id: UserId) -> Option<User> {
        self.service.get_user(id)
    }

    fn list_users(&self) -> Vec<User> {
        self.service.list_users()
    }

    fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, DirectoryError> {
        self.service.update_user(id, patch).map_err(Into::into)
    }

    fn set_user_enabled(&self, id: UserId, enabled: bool) -> Result<User, DirectoryError> {
        self.service
            .set_user_enabled(id, enabled)
            .map_err(Into::into)
    }

    fn remove_user(&self, id: UserId) -> bool {
        self.service.remove_user(id)
    }

    fn create_event(&self, request: NewEventRequest) -> Result<Event, DirectoryError> {
        self.service.create_event(request).map_err(Into::into)
    }

    fn get_event(&self, id: EventId) -> Option<Event> {
        self.service.get_event(id)
    }

    fn list_events(&self) -> Vec<Event> {
        self.service.list_events()
    }

    fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Event, DirectoryError> {
        self.service.update_event(id, patch).map_err(Into::into)
    }

    fn remove_event(&self, id: EventId) -> bool {
        self.service.remove_event(id)
    }

    fn join_event(&self, user: UserId, event: EventId) -> Result<Event, DirectoryError> {
        self.service.join_event(user, event).map_err(Into::into)
    }

    fn leave_event(&self, user: UserId, event: EventId) -> Result<bool, DirectoryError> {
        self.service.leave_event(user, event).map_err(Into::into)
    }

    fn filter_events(&self, filter: &FilterSpec) -> Vec<Event> {
        self.service.filter_events(filter)
    }

    fn events_for_user(&self, user: UserId) -> Result<Vec<Event>, DirectoryError> {
        self.service.events_for_user(user).map_err(Into::into)
    }

    fn organized_events(&self, user: UserId) -> Result<Vec<Event>, DirectoryError> {
        self.service.organized_events(user).map_err(Into::into)
    }

    fn participating_events(&self, user: UserId) -> Result<Vec<Event>, DirectoryError> {
        self.service.participating_events(user).map_err(Into::into)
    }
}
