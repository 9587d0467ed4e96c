//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod mailer;
pub mod notification;

// Re-export commonly used services
pub use auth::{AuthService, AuthContext, Claims};
pub use mailer::{Mailer, HttpMailer, LogMailer, OutgoingEmail, build_mailer};
pub use notification::{EmailJob, EmailTemplate, JobQueue, MailQueue, MailWorker, TemplateRegistry, FLAG_TEMPLATE};
