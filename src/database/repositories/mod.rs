//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod question;
pub mod answer;
pub mod user;

// Re-export repositories
pub use question::QuestionRepository;
pub use answer::AnswerRepository;
pub use user::UserRepository;
