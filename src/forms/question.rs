//! Question form
//!
//! Raw field values as submitted, validated into a [`QuestionRequest`].

use std::sync::OnceLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::forms::FormErrors;
use crate::models::{Question, QuestionRequest, QuestionType};
use crate::utils::helpers::{display_bool, parse_bool};

const MAX_CONTENT_LENGTH: usize = 500;
const MAX_DESCRIPTION_LENGTH: usize = 2000;
const MAX_IDENTIFIER_LENGTH: usize = 64;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("identifier pattern compiles"))
}

/// The new/edit question form exactly as the browser sent it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionForm {
    pub content: String,
    pub description: String,
    pub icon_name: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub free_response: String,
}

impl QuestionForm {
    /// Parse an `application/x-www-form-urlencoded` body. Unknown fields are ignored;
    /// a repeated field keeps its last value.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = QuestionForm::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let target = match key.as_ref() {
                "content" => &mut form.content,
                "description" => &mut form.description,
                "icon_name" => &mut form.icon_name,
                "short_name" => &mut form.short_name,
                "type" => &mut form.question_type,
                "free_response" => &mut form.free_response,
                _ => continue,
            };
            *target = value.into_owned();
        }
        form
    }

    /// Pre-populate the edit form from a stored question
    pub fn from_question(question: &Question) -> Self {
        Self {
            content: question.content.clone(),
            description: question.description.clone(),
            icon_name: question.icon_name.clone(),
            short_name: question.short_name.clone(),
            question_type: question.question_type.to_string(),
            free_response: display_bool(question.free_response).to_string(),
        }
    }

    /// Check every field, collecting all errors rather than stopping at the first
    pub fn validate(&self) -> Result<QuestionRequest, FormErrors> {
        let mut errors = FormErrors::default();

        let content = self.content.trim();
        if content.is_empty() {
            errors.add("content", "This field is required.");
        } else if content.chars().count() > MAX_CONTENT_LENGTH {
            errors.add("content", format!("Must be at most {} characters.", MAX_CONTENT_LENGTH));
        }

        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            errors.add("description", format!("Must be at most {} characters.", MAX_DESCRIPTION_LENGTH));
        }

        let icon_name = self.icon_name.trim();
        check_identifier(&mut errors, "icon_name", icon_name);

        let short_name = self.short_name.trim();
        check_identifier(&mut errors, "short_name", short_name);

        let question_type = match self.question_type.trim() {
            "" => {
                errors.add("type", "This field is required.");
                None
            }
            raw => match raw.parse::<QuestionType>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    errors.add("type", "Not a valid choice.");
                    None
                }
            },
        };

        match question_type {
            Some(question_type) if errors.is_empty() => Ok(QuestionRequest {
                content: content.to_string(),
                description: description.to_string(),
                icon_name: icon_name.to_string(),
                short_name: short_name.to_string(),
                question_type,
                free_response: parse_bool(&self.free_response),
            }),
            _ => Err(errors),
        }
    }
}

fn check_identifier(errors: &mut FormErrors, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.add(field, "This field is required.");
    } else if value.len() > MAX_IDENTIFIER_LENGTH {
        errors.add(field, format!("Must be at most {} characters.", MAX_IDENTIFIER_LENGTH));
    } else if !identifier_pattern().is_match(value) {
        errors.add(field, "Use lowercase letters, digits, '-' and '_' only.");
    }
}
