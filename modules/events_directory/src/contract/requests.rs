//! Input records handed to the directory by its callers.
//!
//! Creation and login requests are assembled through builders whose `build()` refuses to
//! produce a request while a required field is missing. Patches carry one `Option` per
//! field: `None` leaves the target untouched, `Some` overwrites it.

use chrono::{NaiveDate, NaiveDateTime};

use crate::contract::error::DirectoryError;
use crate::contract::model::{Event, FormatPreference, Password, PreferenceSet, User, UserId};

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DirectoryError> {
    value.ok_or(DirectoryError::missing_field(field))
}

/// Data for registering a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: Password,
    pub(crate) location: String,
    pub(crate) birth_date: NaiveDate,
    pub(crate) themes: PreferenceSet,
}

impl RegisterUserRequest {
    pub fn builder() -> RegisterUserRequestBuilder {
        RegisterUserRequestBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn themes(&self) -> PreferenceSet {
        self.themes
    }
}

#[derive(Debug, Default)]
pub struct RegisterUserRequestBuilder {
    name: Option<String>,
    email: Option<String>,
    password: Option<Password>,
    location: Option<String>,
    birth_date: Option<NaiveDate>,
    themes: PreferenceSet,
}

impl RegisterUserRequestBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Password::new(password));
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn themes(mut self, themes: PreferenceSet) -> Self {
        self.themes = themes;
        self
    }

    pub fn build(self) -> Result<RegisterUserRequest, DirectoryError> {
        Ok(RegisterUserRequest {
            name: required(self.name, "name")?,
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
            location: required(self.location, "location")?,
            birth_date: required(self.birth_date, "birth_date")?,
            themes: self.themes,
        })
    }
}

/// Credentials presented for authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub(crate) email: String,
    pub(crate) password: Password,
}

impl LoginRequest {
    pub fn builder() -> LoginRequestBuilder {
        LoginRequestBuilder::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Default)]
pub struct LoginRequestBuilder {
    email: Option<String>,
    password: Option<Password>,
}

impl LoginRequestBuilder {
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Password::new(password));
        self
    }

    pub fn build(self) -> Result<LoginRequest, DirectoryError> {
        Ok(LoginRequest {
            email: required(self.email, "email")?,
            password: required(self.password, "password")?,
        })
    }
}

/// Data for creating a new event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventRequest {
    pub(crate) organizer: UserId,
    pub(crate) title: String,
    pub(crate) photo: Option<String>,
    pub(crate) description: String,
    pub(crate) format: FormatPreference,
    pub(crate) location: String,
    pub(crate) starts_at: NaiveDateTime,
    pub(crate) ends_at: NaiveDateTime,
    pub(crate) max_participants: u32,
    pub(crate) rating: u8,
    pub(crate) certified: bool,
    pub(crate) themes: PreferenceSet,
}

impl NewEventRequest {
    pub fn builder() -> NewEventRequestBuilder {
        NewEventRequestBuilder::default()
    }

    pub fn organizer(&self) -> UserId {
        self.organizer
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn format(&self) -> FormatPreference {
        self.format
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.starts_at
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.ends_at
    }

    pub fn max_participants(&self) -> u32 {
        self.max_participants
    }

    pub fn themes(&self) -> PreferenceSet {
        self.themes
    }
}

#[derive(Debug, Default)]
pub struct NewEventRequestBuilder {
    organizer: Option<UserId>,
    title: Option<String>,
    photo: Option<String>,
    description: Option<String>,
    format: Option<FormatPreference>,
    location: Option<String>,
    starts_at: Option<NaiveDateTime>,
    ends_at: Option<NaiveDateTime>,
    max_participants: Option<u32>,
    rating: u8,
    certified: bool,
    themes: PreferenceSet,
}

impl NewEventRequestBuilder {
    pub fn organizer(mut self, organizer: UserId) -> Self {
        self.organizer = Some(organizer);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn format(mut self, format: impl Into<FormatPreference>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn schedule(mut self, starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    pub fn max_participants(mut self, max_participants: u32) -> Self {
        self.max_participants = Some(max_participants);
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    pub fn certified(mut self, certified: bool) -> Self {
        self.certified = certified;
        self
    }

    pub fn themes(mut self, themes: PreferenceSet) -> Self {
        self.themes = themes;
        self
    }

    pub fn build(self) -> Result<NewEventRequest, DirectoryError> {
        Ok(NewEventRequest {
            organizer: required(self.organizer, "organizer")?,
            title: required(self.title, "title")?,
            photo: self.photo,
            description: self.description.unwrap_or_default(),
            format: required(self.format, "format")?,
            location: required(self.location, "location")?,
            starts_at: required(self.starts_at, "starts_at")?,
            ends_at: required(self.ends_at, "ends_at")?,
            max_participants: required(self.max_participants, "max_participants")?,
            rating: self.rating,
            certified: self.certified,
            themes: self.themes,
        })
    }
}

/// Partial update data for a user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Password>,
    pub location: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub themes: Option<PreferenceSet>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field present in the patch; absent fields keep their value.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(location) = self.location {
            user.location = location;
        }
        if let Some(birth_date) = self.birth_date {
            user.birth_date = birth_date;
        }
        if let Some(themes) = self.themes {
            user.themes = themes;
        }
    }
}

/// Partial update data for an event.
///
/// `photo` is doubly optional: `Some(None)` removes the photo, `None` keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub photo: Option<Option<String>>,
    pub description: Option<String>,
    pub format: Option<FormatPreference>,
    pub location: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
    pub ends_at: Option<NaiveDateTime>,
    pub max_participants: Option<u32>,
    pub rating: Option<u8>,
    pub certified: Option<bool>,
    pub themes: Option<PreferenceSet>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite every field present in the patch; absent fields keep their value.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(photo) = self.photo {
            event.photo = photo;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(format) = self.format {
            event.format = format;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(starts_at) = self.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = self.ends_at {
            event.ends_at = ends_at;
        }
        if let Some(max_participants) = self.max_participants {
            event.max_participants = max_participants;
        }
        if let Some(rating) = self.rating {
            event.rating = rating;
        }
        if let Some(certified) = self.certified {
            event.certified = certified;
        }
        if let Some(themes) = self.themes {
            event.themes = themes;
        }
    }
}
