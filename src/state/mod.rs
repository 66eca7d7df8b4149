//! State management module
//!
//! This module holds the application services and the viewer-scoped
//! interface context

pub mod context;

// Re-export commonly used state components
pub use context::{AppContext, UiContext};
