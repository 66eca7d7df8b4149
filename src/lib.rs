//! PartyBoard
//!
//! Community events dashboard core. This library provides the client-side
//! event query engine (filter, search, sort), a typed REST client for the
//! events backend, CSV and text export, and bilingual interface strings.

#![allow(non_snake_case)]

pub mod config;
pub mod i18n;
pub mod models;
pub mod query;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PartyBoardError, Result};

// Re-export main components for easy access
pub use query::{EventQueryEngine, QuerySpec};
pub use services::ApiClient;
pub use state::{AppContext, UiContext};
pub use i18n::I18n;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
