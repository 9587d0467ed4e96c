//! Shared application state
//!
//! This module holds the context passed to every request handler.

pub mod context;

pub use context::AppContext;
