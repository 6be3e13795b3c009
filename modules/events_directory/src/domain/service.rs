use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{Event, EventId, FilterSpec, User, UserId};
use crate::contract::requests::{
    EventPatch, LoginRequest, NewEventRequest, RegisterUserRequest, UserPatch,
};
use crate::domain::error::DomainError;
use crate::domain::events::DirectoryEvent;
use crate::domain::filter;
use crate::domain::ports::EventPublisher;
use crate::domain::repo::{EventsRepository, UsersRepository};

/// Domain service with business rules for the events directory.
/// Depends only on the repository ports, not on infra types.
///
/// Users and events reference each other by id. Every mutation that touches both
/// registries runs under one write lock, so organizer and participant lists never
/// disagree between the two sides.
#[derive(Clone)]
pub struct Service {
    users: Arc<dyn UsersRepository>,
    events: Arc<dyn EventsRepository>,
    publisher: Arc<dyn EventPublisher<DirectoryEvent>>,
    config: ServiceConfig,
    writes: Arc<Mutex<()>>,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
    pub max_title_length: usize,
    pub max_rating: u8,
    pub enforce_capacity: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            max_title_length: 200,
            max_rating: 5,
            enforce_capacity: true,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        users: Arc<dyn UsersRepository>,
        events: Arc<dyn EventsRepository>,
        publisher: Arc<dyn EventPublisher<DirectoryEvent>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            users,
            events,
            publisher,
            config,
            writes: Arc::new(Mutex::new(())),
        }
    }

    // --- users ---

    #[instrument(
        name = "events_directory.service.register_user",
        skip(self, request),
        fields(email = %request.email)
    )]
    pub fn register_user(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        info!("Registering new user");

        self.validate_name(&request.name)?;
        self.validate_email(&request.email)?;

        let _guard = self.writes.lock();

        if self.users.find_by_email(&request.email).is_some() {
            warn!("Email is already registered");
            return Err(DomainError::email_already_exists(request.email));
        }

        let user = User {
            id: self.users.next_id(),
            name: request.name,
            email: request.email,
            password: request.password,
            location: request.location,
            birth_date: request.birth_date,
            themes: request.themes,
            participating: Vec::new(),
            organizing: Vec::new(),
            enabled: true,
        };
        self.users.insert(user.clone())?;

        self.publish(DirectoryEvent::UserRegistered {
            id: user.id,
            at: Utc::now(),
        });

        info!("Successfully registered user with id={}", user.id);
        Ok(user)
    }

    #[instrument(
        name = "events_directory.service.authenticate",
        skip(self, request),
        fields(email = %request.email)
    )]
    pub fn authenticate(&self, request: LoginRequest) -> Result<User, DomainError> {
        debug!("Authenticating user");

        let user = self
            .users
            .find_by_email(&request.email)
            .filter(|user| user.password.matches(&request.password))
            .ok_or_else(|| {
                warn!("Rejected credentials");
                DomainError::InvalidCredentials
            })?;

        if !user.enabled {
            warn!(user_id = %user.id, "Disabled account tried to authenticate");
            return Err(DomainError::account_disabled(user.id));
        }

        info!(user_id = %user.id, "User authenticated");
        Ok(user)
    }

    #[instrument(name = "events_directory.service.get_user", skip(self), fields(user_id = %id))]
    pub fn get_user(&self, id: UserId) -> Option<User> {
        let user = self.users.find_by_id(id);
        debug!(found = user.is_some(), "Looked up user");
        user
    }

    pub fn list_users(&self) -> Vec<User> {
        self.users.list()
    }

    #[instrument(
        name = "events_directory.service.update_user",
        skip(self, patch),
        fields(user_id = %id)
    )]
    pub fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        self.validate_user_patch(&patch)?;

        let _guard = self.writes.lock();

        let mut current = self
            .users
            .find_by_id(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;

        // Uniqueness for email change
        if let Some(ref new_email) = patch.email {
            if let Some(owner) = self.users.find_by_email(new_email) {
                if owner.id != id {
                    warn!("Email is already registered");
                    return Err(DomainError::email_already_exists(new_email.clone()));
                }
            }
        }

        patch.apply_to(&mut current);
        self.users.update(current.clone())?;

        self.publish(DirectoryEvent::UserUpdated {
            id: current.id,
            at: Utc::now(),
        });

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(
        name = "events_directory.service.set_user_enabled",
        skip(self),
        fields(user_id = %id)
    )]
    pub fn set_user_enabled(&self, id: UserId, enabled: bool) -> Result<User, DomainError> {
        let _guard = self.writes.lock();

        let mut current = self
            .users
            .find_by_id(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        current.enabled = enabled;
        self.users.update(current.clone())?;

        self.publish(DirectoryEvent::UserUpdated {
            id,
            at: Utc::now(),
        });

        info!(enabled, "Changed user activation");
        Ok(current)
    }

    /// Removes the user, drops them from every event they joined and removes every
    /// event they organize. Returns false when the id is unknown.
    #[instrument(name = "events_directory.service.remove_user", skip(self), fields(user_id = %id))]
    pub fn remove_user(&self, id: UserId) -> bool {
        info!("Removing user");

        let _guard = self.writes.lock();

        let Some(user) = self.users.remove(id) else {
            debug!("User is not registered");
            return false;
        };

        for event_id in &user.participating {
            self.drop_participant(*event_id, id);
        }
        for event_id in &user.organizing {
            if let Some(event) = self.events.remove(*event_id) {
                self.detach_event(&event);
                self.publish(DirectoryEvent::EventRemoved {
                    id: event.id,
                    at: Utc::now(),
                });
            }
        }

        self.publish(DirectoryEvent::UserRemoved { id, at: Utc::now() });

        info!(
            organized_removed = user.organizing.len(),
            "Successfully removed user"
        );
        true
    }

    // --- events ---

    #[instrument(
        name = "events_directory.service.create_event",
        skip(self, request),
        fields(organizer = %request.organizer, title = %request.title)
    )]
    pub fn create_event(&self, request: NewEventRequest) -> Result<Event, DomainError> {
        info!("Creating new event");

        self.validate_title(&request.title)?;
        self.validate_rating(request.rating)?;
        validate_schedule(request.starts_at, request.ends_at)?;
        validate_capacity(request.max_participants)?;

        let _guard = self.writes.lock();

        let mut organizer = self
            .users
            .find_by_id(request.organizer)
            .ok_or_else(|| DomainError::user_not_found(request.organizer))?;
        if !organizer.enabled {
            warn!("Disabled user cannot organize events");
            return Err(DomainError::account_disabled(organizer.id));
        }

        let event = Event {
            id: self.events.next_id(),
            organizer: organizer.id,
            title: request.title,
            photo: request.photo,
            description: request.description,
            format: request.format,
            location: request.location,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            max_participants: request.max_participants,
            rating: request.rating,
            certified: request.certified,
            themes: request.themes,
            participants: Vec::new(),
        };
        self.events.insert(event.clone())?;

        organizer.organizing.push(event.id);
        self.users.update(organizer)?;

        self.publish(DirectoryEvent::EventCreated {
            id: event.id,
            organizer: event.organizer,
            at: Utc::now(),
        });

        info!("Successfully created event with id={}", event.id);
        Ok(event)
    }

    #[instrument(name = "events_directory.service.get_event", skip(self), fields(event_id = %id))]
    pub fn get_event(&self, id: EventId) -> Option<Event> {
        let event = self.events.find_by_id(id);
        debug!(found = event.is_some(), "Looked up event");
        event
    }

    pub fn list_events(&self) -> Vec<Event> {
        self.events.list()
    }

    #[instrument(
        name = "events_directory.service.update_event",
        skip(self, patch),
        fields(event_id = %id)
    )]
    pub fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Event, DomainError> {
        info!("Updating event");

        if let Some(ref title) = patch.title {
            self.validate_title(title)?;
        }
        if let Some(rating) = patch.rating {
            self.validate_rating(rating)?;
        }
        if let Some(max_participants) = patch.max_participants {
            validate_capacity(max_participants)?;
        }

        let _guard = self.writes.lock();

        let mut current = self
            .events
            .find_by_id(id)
            .ok_or_else(|| DomainError::event_not_found(id))?;

        patch.apply_to(&mut current);

        // Checked on the merged result: a patch may move only one end of the range.
        validate_schedule(current.starts_at, current.ends_at)?;
        if self.config.enforce_capacity
            && current.participants.len() > current.max_participants as usize
        {
            return Err(DomainError::validation(
                "max_participants",
                format!(
                    "{} participants have already joined",
                    current.participants.len()
                ),
            ));
        }

        self.events.update(current.clone())?;

        self.publish(DirectoryEvent::EventUpdated {
            id: current.id,
            at: Utc::now(),
        });

        info!("Successfully updated event");
        Ok(current)
    }

    /// Removes the event and scrubs it from its organizer and participants.
    /// Returns false when the id is unknown.
    #[instrument(name = "events_directory.service.remove_event", skip(self), fields(event_id = %id))]
    pub fn remove_event(&self, id: EventId) -> bool {
        info!("Removing event");

        let _guard = self.writes.lock();

        let Some(event) = self.events.remove(id) else {
            debug!("Event is not registered");
            return false;
        };
        self.detach_event(&event);

        self.publish(DirectoryEvent::EventRemoved { id, at: Utc::now() });

        info!("Successfully removed event");
        true
    }

    // --- participation ---

    /// Adds the user to the event's participants. Joining twice is a no-op.
    #[instrument(name = "events_directory.service.join_event", skip(self))]
    pub fn join_event(&self, user_id: UserId, event_id: EventId) -> Result<Event, DomainError> {
        info!("Joining event");

        let _guard = self.writes.lock();

        let mut user = self
            .users
            .find_by_id(user_id)
            .ok_or_else(|| DomainError::user_not_found(user_id))?;
        if !user.enabled {
            return Err(DomainError::account_disabled(user_id));
        }
        let mut event = self
            .events
            .find_by_id(event_id)
            .ok_or_else(|| DomainError::event_not_found(event_id))?;

        if event.has_participant(user_id) {
            debug!("User already participates");
            return Ok(event);
        }
        if self.config.enforce_capacity && event.is_full() {
            warn!(capacity = event.max_participants, "Event is full");
            return Err(DomainError::event_full(event_id, event.max_participants));
        }

        event.participants.push(user_id);
        user.participating.push(event_id);
        self.events.update(event.clone())?;
        self.users.update(user)?;

        self.publish(DirectoryEvent::ParticipantJoined {
            event: event_id,
            user: user_id,
            at: Utc::now(),
        });

        info!("Successfully joined event");
        Ok(event)
    }

    /// Returns false when the user was not a participant.
    #[instrument(name = "events_directory.service.leave_event", skip(self))]
    pub fn leave_event(&self, user_id: UserId, event_id: EventId) -> Result<bool, DomainError> {
        info!("Leaving event");

        let _guard = self.writes.lock();

        let mut user = self
            .users
            .find_by_id(user_id)
            .ok_or_else(|| DomainError::user_not_found(user_id))?;
        let mut event = self
            .events
            .find_by_id(event_id)
            .ok_or_else(|| DomainError::event_not_found(event_id))?;

        if !event.has_participant(user_id) {
            debug!("User does not participate");
            return Ok(false);
        }

        event.participants.retain(|p| *p != user_id);
        user.participating.retain(|e| *e != event_id);
        self.events.update(event)?;
        self.users.update(user)?;

        self.publish(DirectoryEvent::ParticipantLeft {
            event: event_id,
            user: user_id,
            at: Utc::now(),
        });

        info!("Successfully left event");
        Ok(true)
    }

    // --- queries ---

    /// Matching events in creation order, copied from one consistent view of the
    /// event registry.
    #[instrument(name = "events_directory.service.filter_events", skip(self, spec))]
    pub fn filter_events(&self, spec: &FilterSpec) -> Vec<Event> {
        let matched = self
            .events
            .find_matching(&|event: &Event| filter::matches(spec, event));
        debug!("Filter matched {} events", matched.len());
        matched
    }

    /// Events sharing at least one theme with the user's preferences. A user without
    /// preferences gets every event.
    #[instrument(name = "events_directory.service.events_for_user", skip(self), fields(user_id = %id))]
    pub fn events_for_user(&self, id: UserId) -> Result<Vec<Event>, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        Ok(self.filter_events(&FilterSpec::for_user(&user)))
    }

    pub fn organized_events(&self, id: UserId) -> Result<Vec<Event>, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        Ok(self.resolve_events(&user.organizing))
    }

    pub fn participating_events(&self, id: UserId) -> Result<Vec<Event>, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .ok_or_else(|| DomainError::user_not_found(id))?;
        Ok(self.resolve_events(&user.participating))
    }

    // --- reference maintenance ---

    fn resolve_events(&self, ids: &[EventId]) -> Vec<Event> {
        ids.iter()
            .filter_map(|id| self.events.find_by_id(*id))
            .collect()
    }

    /// Scrub a removed event from its organizer's and participants' lists.
    fn detach_event(&self, event: &Event) {
        if let Some(mut organizer) = self.users.find_by_id(event.organizer) {
            organizer.organizing.retain(|e| *e != event.id);
            self.store_user(organizer);
        }
        for participant in &event.participants {
            if let Some(mut user) = self.users.find_by_id(*participant) {
                user.participating.retain(|e| *e != event.id);
                self.store_user(user);
            }
        }
    }

    fn drop_participant(&self, event_id: EventId, user_id: UserId) {
        if let Some(mut event) = self.events.find_by_id(event_id) {
            event.participants.retain(|p| *p != user_id);
            if let Err(e) = self.events.update(event) {
                warn!(error = %e, "Failed to drop participant from event {}", event_id);
            }
        }
    }

    fn store_user(&self, user: User) {
        let id = user.id;
        if let Err(e) = self.users.update(user) {
            warn!(error = %e, "Failed to store references of user {}", id);
        }
    }

    fn publish(&self, event: DirectoryEvent) {
        self.publisher.publish(&event);
    }

    // --- validation helpers ---

    fn validate_user_patch(&self, patch: &UserPatch) -> Result<(), DomainError> {
        if let Some(ref email) = patch.email {
            self.validate_email(email)?;
        }
        if let Some(ref name) = patch.name {
            self.validate_name(name)?;
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() || !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email.to_string()));
        }
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        validate_text("name", name, self.config.max_name_length)
    }

    fn validate_title(&self, title: &str) -> Result<(), DomainError> {
        validate_text("title", title, self.config.max_title_length)
    }

    fn validate_rating(&self, rating: u8) -> Result<(), DomainError> {
        if rating > self.config.max_rating {
            return Err(DomainError::invalid_rating(rating, self.config.max_rating));
        }
        Ok(())
    }
}

fn validate_text(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::empty_field(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::field_too_long(field, len, max));
    }
    Ok(())
}

fn validate_schedule(starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> Result<(), DomainError> {
    if starts_at >= ends_at {
        return Err(DomainError::invalid_schedule(starts_at, ends_at));
    }
    Ok(())
}

fn validate_capacity(max_participants: u32) -> Result<(), DomainError> {
    if max_participants == 0 {
        return Err(DomainError::validation(
            "max_participants",
            "must allow at least one participant",
        ));
    }
    Ok(())
}
