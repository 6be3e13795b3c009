pub mod events;
pub mod users;

pub use events::InMemoryEventsRepository;
pub use users::InMemoryUsersRepository;
