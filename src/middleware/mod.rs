//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;

// Re-export commonly used middleware
pub use auth::{require_admin, require_login};
pub use logging::{request_span, RequestTimer};
