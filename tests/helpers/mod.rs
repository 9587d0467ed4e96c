//! Test helpers module
//!
//! In-memory stores and a recording mail queue for driving handlers without
//! a database, fixture builders, and a PostgreSQL container helper for the
//! repository tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod memory_store;
pub mod recording_queue;
pub mod test_data;

pub use database_helper::*;
pub use memory_store::*;
pub use recording_queue::*;
pub use test_data::*;
