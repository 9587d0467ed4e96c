//! Notification service implementation
//!
//! Handlers submit [`EmailJob`]s to a [`JobQueue`] and move on. The
//! [`MailWorker`] drains the queue in the background, renders each job
//! through the template registry and hands the result to a [`Mailer`].
//! Delivery failures are logged and dropped; nothing is retried.

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::config::MailConfig;
use crate::models::Answer;
use crate::services::mailer::{Mailer, OutgoingEmail};
use crate::utils::errors::{QuestionDeskError, Result};
use crate::utils::logging::log_mail_delivery;

/// Template used for answer reports
pub const FLAG_TEMPLATE: &str = "question/email/flag";

/// One email to send, as submitted by a handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailJob {
    pub recipient: String,
    pub subject: String,
    pub template: String,
    pub answer: Answer,
    pub link: String,
}

/// Hand-off point between request handlers and the mail worker
pub trait JobQueue: Send + Sync {
    /// Submit a job without waiting for delivery. Fails only when the
    /// submission itself is refused.
    fn enqueue(&self, job: EmailJob) -> Result<()>;
}

/// Bounded in-process queue feeding a [`MailWorker`]
#[derive(Debug, Clone)]
pub struct MailQueue {
    sender: mpsc::Sender<EmailJob>,
}

impl MailQueue {
    /// Create a queue and the receiving end for its worker
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EmailJob>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl JobQueue for MailQueue {
    fn enqueue(&self, job: EmailJob) -> Result<()> {
        match self.sender.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(job)) => {
                warn!(recipient = %job.recipient, "Mail queue full, job refused");
                Err(QuestionDeskError::QueueUnavailable("mail queue is full".to_string()))
            }
            Err(TrySendError::Closed(_)) => {
                Err(QuestionDeskError::QueueUnavailable("mail worker has stopped".to_string()))
            }
        }
    }
}

/// Email body template with `{placeholder}` parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub key: String,
    pub text: String,
    pub html: String,
}

/// Registry of email templates keyed by template id
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: HashMap<String, EmailTemplate>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TemplateRegistry {
    /// Registry holding the built-in templates
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            templates: HashMap::new(),
        };

        registry.add_template(EmailTemplate {
            key: FLAG_TEMPLATE.to_string(),
            text: "An answer has been reported.\n\n\
                   Answer #{answer_id} to question #{question_id} (club #{club_id}):\n\
                   \"{answer_content}\"\n\n\
                   To delete this answer, visit:\n{link}\n"
                .to_string(),
            html: "<p>An answer has been reported.</p>\
                   <p>Answer #{answer_id} to question #{question_id} (club #{club_id}):</p>\
                   <blockquote>{answer_content}</blockquote>\
                   <p><a href=\"{link}\">Delete this answer</a></p>"
                .to_string(),
        });

        registry
    }

    /// Add or replace a template
    pub fn add_template(&mut self, template: EmailTemplate) {
        self.templates.insert(template.key.clone(), template);
    }

    /// Render the text and HTML bodies for a job
    pub fn render(&self, job: &EmailJob) -> Result<(String, String)> {
        let template = self
            .templates
            .get(&job.template)
            .ok_or_else(|| QuestionDeskError::TemplateNotFound(job.template.clone()))?;

        let parameters = job_parameters(job);
        let text = substitute(&template.text, &parameters, |value| value.to_string());
        let html = substitute(&template.html, &parameters, escape_html);
        Ok((text, html))
    }
}

fn job_parameters(job: &EmailJob) -> HashMap<&'static str, String> {
    HashMap::from([
        ("recipient", job.recipient.clone()),
        ("answer_id", job.answer.id.to_string()),
        ("answer_content", job.answer.content.clone()),
        ("question_id", job.answer.question_id.to_string()),
        ("club_id", job.answer.club_id.to_string()),
        ("link", job.link.clone()),
    ])
}

fn substitute(
    template: &str,
    parameters: &HashMap<&'static str, String>,
    encode: impl Fn(&str) -> String,
) -> String {
    // Single pass, so placeholders inside substituted values stay literal
    let mut formatted = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        formatted.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let known = after
            .find('}')
            .and_then(|end| parameters.get(&after[..end]).map(|value| (end, value)));
        match known {
            Some((end, value)) => {
                formatted.push_str(&encode(value));
                rest = &after[end + 1..];
            }
            None => {
                formatted.push('{');
                rest = after;
            }
        }
    }
    formatted.push_str(rest);
    formatted
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Background consumer of the mail queue
pub struct MailWorker {
    receiver: mpsc::Receiver<EmailJob>,
    mailer: Arc<dyn Mailer>,
    templates: TemplateRegistry,
    sender_address: String,
    subject_prefix: String,
}

impl MailWorker {
    pub fn new(
        receiver: mpsc::Receiver<EmailJob>,
        mailer: Arc<dyn Mailer>,
        templates: TemplateRegistry,
        config: &MailConfig,
    ) -> Self {
        Self {
            receiver,
            mailer,
            templates,
            sender_address: config.sender.clone(),
            subject_prefix: config.subject_prefix.clone(),
        }
    }

    /// Run the worker on its own task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process jobs until every queue handle has been dropped
    pub async fn run(mut self) {
        info!("Mail worker started");
        while let Some(job) = self.receiver.recv().await {
            let failure = self.deliver(&job).await.err().map(|e| e.to_string());
            log_mail_delivery(&job.recipient, &job.template, failure.as_deref());
        }
        info!("Mail worker stopped");
    }

    async fn deliver(&self, job: &EmailJob) -> Result<()> {
        let (text_body, html_body) = self.templates.render(job)?;
        let subject = if self.subject_prefix.is_empty() {
            job.subject.clone()
        } else {
            format!("{} {}", self.subject_prefix, job.subject)
        };

        let email = OutgoingEmail {
            from: self.sender_address.clone(),
            to: job.recipient.clone(),
            subject,
            text_body,
            html_body,
        };

        debug!(to = %email.to, template = %job.template, "Delivering email");
        self.mailer.send(&email).await
    }
}
