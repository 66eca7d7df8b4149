//! Data models module
//!
//! This module contains all data structures exchanged with the REST backend

pub mod event;
pub mod user;
pub mod wire;

// Re-export commonly used models
pub use event::{Event, Song, DressDetail, EventParticipant, EventStatus, CreateEventRequest, UpdateEventRequest, StatusUpdateRequest, SongInput};
pub use user::{User, Role, Page, CreateUserRequest, UpdateUserRequest};
pub use wire::ListResponse;
