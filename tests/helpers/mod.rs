//! Test helpers module
//!
//! This module provides utilities and helpers for testing the PartyBoard
//! library: event builders, ready-made fixture sets and a mock REST backend.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_data;

pub use backend_mock::*;
pub use test_data::*;
