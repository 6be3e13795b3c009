pub mod error;
pub mod events;
pub mod filter;
pub mod identity;
pub mod ports;
pub mod repo;
pub mod service;
