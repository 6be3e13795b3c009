// === PUBLIC CONTRACT ===
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model, requests};

// === MODULE DEFINITION ===
pub mod module;
pub use module::{EventsDirectory, MODULE_NAME};

// === INTERNAL MODULES ===
// Exposed for comprehensive testing; external consumers should stick to `contract`.
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
