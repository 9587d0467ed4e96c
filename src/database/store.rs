//! Storage seams
//!
//! Handlers only see these traits. The PostgreSQL repositories implement them
//! for production; tests plug in their own stores.

use async_trait::async_trait;
use crate::models::{Answer, Question, QuestionRequest, User};
use crate::utils::errors::Result;

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Insert a question and return the stored row
    async fn create(&self, request: QuestionRequest) -> Result<Question>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Question>>;

    /// Every question in id order
    async fn list(&self) -> Result<Vec<Question>>;

    /// Overwrite every mutable field. Returns `None` when the row is gone.
    async fn update(&self, id: i64, request: QuestionRequest) -> Result<Option<Question>>;

    /// Delete a question and all of its answers in one commit.
    /// Returns whether a question row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Answer>>;

    async fn list_for_question(&self, question_id: i64) -> Result<Vec<Answer>>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Every user holding the named role
    async fn find_by_role(&self, role_name: &str) -> Result<Vec<User>>;
}
