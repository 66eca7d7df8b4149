//! Internationalization module
//!
//! This module handles the bilingual (English/Arabic) interface strings,
//! right-to-left detection and administrator translation overrides.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, Language, TranslationParams};
