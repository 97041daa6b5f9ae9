// Mergington Activities - Core Library
// Exposes the registry and HTTP router for the server binary and tests

pub mod activities;
pub mod config;
pub mod error;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use activities::{default_activities, Activity, ActivityRegistry};
pub use config::Config;
pub use error::ActivityError;

#[cfg(feature = "server")]
pub use api::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
