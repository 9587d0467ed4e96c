//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod question;
pub mod answer;
pub mod user;

// Re-export commonly used models
pub use question::{Question, QuestionRequest, QuestionType};
pub use answer::Answer;
pub use user::User;
