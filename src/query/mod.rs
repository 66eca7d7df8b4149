//! Client-side event list queries
//!
//! This module holds the filter/sort/search pipeline applied to event lists
//! after they have been fetched, plus the canned views built on top of it.

pub mod engine;
mod keys;
pub mod spec;
pub mod views;

pub use engine::{EventQueryEngine, sort_events};
pub use spec::{
    DateRange, FieldFilters, FilterField, QuerySpec, SortDirection, SortKey, SortState,
    ALL_STATUSES, toggle_sort,
};
pub use views::{by_status, nearest_event, past, upcoming, StatusCounts};
