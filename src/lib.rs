//! QuestionDesk
//!
//! Administrative management of the survey questions shown on club pages.
//! Administrators create, edit and delete questions and remove answers; any
//! signed-in member may report an answer, which emails every administrator
//! through a background mail queue.

pub mod config;
pub mod database;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod urls;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{QuestionDeskError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use state::AppContext;
