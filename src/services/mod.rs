//! Services module
//!
//! This module contains the REST backend client and the export helpers

pub mod api;
pub mod export;

// Re-export commonly used services
pub use api::{ApiClient, StatusUpdateResponse};
pub use export::{export_file_name, whatsapp_link, ExportService};
