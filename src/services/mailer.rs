//! Mail delivery backends
//!
//! A [`Mailer`] hands a fully rendered email to whatever delivers it. The HTTP
//! mailer posts to a transactional mail API; the log mailer only records the
//! message, which is what development setups use.

use std::time::Duration;
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use crate::config::{MailBackend, MailConfig};
use crate::utils::errors::{QuestionDeskError, Result};

/// A rendered email ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// Build the mailer selected by configuration
pub fn build_mailer(config: &MailConfig) -> Result<Box<dyn Mailer>> {
    match config.backend {
        MailBackend::Log => Ok(Box::new(LogMailer)),
        MailBackend::Http => Ok(Box::new(HttpMailer::new(config)?)),
    }
}

/// Mailer that writes messages to the log instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text_body,
            "Email not sent (log mailer)"
        );
        Ok(())
    }
}

/// Mailer posting JSON messages to an HTTP mail API
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("question-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let mut request = self.client.post(&self.api_url).json(email);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuestionDeskError::MailDelivery(format!(
                "Mail API returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
