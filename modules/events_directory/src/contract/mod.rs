pub mod client;
pub mod error;
pub mod model;
pub mod requests;

pub use client::EventsDirectoryApi;
pub use error::DirectoryError;
pub use model::{
    Event, EventFormat, EventId, FilterSpec, FormatPreference, Password, PreferenceSet, Theme,
    User, UserId,
};
pub use requests::{EventPatch, LoginRequest, NewEventRequest, RegisterUserRequest, UserPatch};
