//! Request handlers module
//!
//! Handlers take the application context, the resolved caller and any
//! submitted form, and return an [`Outcome`]: a page to render or a place to
//! redirect to, each with the flash messages to show.
//! - Question handlers manage the question catalogue
//! - Answer handlers delete and report answers

pub mod questions;
pub mod answers;

use hyper::StatusCode;
use serde::Serialize;
use crate::forms::{FormErrors, QuestionForm};
use crate::models::{Answer, Question};

// Re-export commonly used handler functions
pub use questions::*;
pub use answers::*;

/// Category a flash message is shown under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashCategory {
    Success,
    FormSuccess,
}

/// One-shot acknowledgment shown after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    pub fn form_success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::FormSuccess,
            message: message.into(),
        }
    }
}

/// Which face of the manage-question page is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManageMode {
    Info,
    Edit,
    ConfirmDelete,
}

/// Template context of each page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Page {
    NewQuestion {
        form: QuestionForm,
        errors: FormErrors,
        created: Option<Question>,
    },
    Questions {
        questions: Vec<Question>,
    },
    ManageQuestion {
        mode: ManageMode,
        question: Question,
        answers: Vec<Answer>,
        form: Option<QuestionForm>,
        errors: FormErrors,
    },
}

impl Page {
    /// Template the front end renders this page with
    pub fn template(&self) -> &'static str {
        match self {
            Page::NewQuestion { .. } => "question/new_question.html",
            Page::Questions { .. } => "question/questions.html",
            Page::ManageQuestion { .. } => "question/manage_question.html",
        }
    }

    pub fn errors(&self) -> Option<&FormErrors> {
        match self {
            Page::NewQuestion { errors, .. } | Page::ManageQuestion { errors, .. } => Some(errors),
            Page::Questions { .. } => None,
        }
    }
}

/// A page plus the flashes shown on it
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub page: Page,
    pub flashes: Vec<Flash>,
}

impl View {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            flashes: Vec::new(),
        }
    }

    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }

    /// A page re-rendered because of invalid input is reported as 422
    pub fn status(&self) -> StatusCode {
        match self.page.errors() {
            Some(errors) if !errors.is_empty() => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::OK,
        }
    }
}

/// Where to send the browser next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub flashes: Vec<Flash>,
}

/// What a handler produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    Redirect(Redirect),
}

impl Outcome {
    pub fn redirect(location: String, flash: Flash) -> Self {
        Outcome::Redirect(Redirect {
            location,
            flashes: vec![flash],
        })
    }

    pub fn flashes(&self) -> &[Flash] {
        match self {
            Outcome::Render(view) => &view.flashes,
            Outcome::Redirect(redirect) => &redirect.flashes,
        }
    }
}

impl From<View> for Outcome {
    fn from(view: View) -> Self {
        Outcome::Render(view)
    }
}
