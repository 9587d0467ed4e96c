//! Database service layer
//!
//! This module provides a high-level interface to database operations

use std::sync::Arc;
use crate::database::{health_check, AnswerRepository, DatabasePool, QuestionRepository, UserRepository};
use crate::database::store::{AnswerStore, QuestionStore, UserStore};
use crate::models::{Answer, Question};
use crate::utils::errors::QuestionDeskError;

#[derive(Clone)]
pub struct DatabaseService {
    pub questions: Arc<dyn QuestionStore>,
    pub answers: Arc<dyn AnswerStore>,
    pub users: Arc<dyn UserStore>,
    pool: Option<DatabasePool>,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            questions: Arc::new(QuestionRepository::new(pool.clone())),
            answers: Arc::new(AnswerRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Build a service over arbitrary stores
    pub fn from_stores(
        questions: Arc<dyn QuestionStore>,
        answers: Arc<dyn AnswerStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            questions,
            answers,
            users,
            pool: None,
        }
    }

    /// Load a question or fail with `QuestionNotFound`
    pub async fn require_question(&self, question_id: i64) -> Result<Question, QuestionDeskError> {
        self.questions
            .find_by_id(question_id)
            .await?
            .ok_or(QuestionDeskError::QuestionNotFound { question_id })
    }

    /// Load an answer or fail with `AnswerNotFound`
    pub async fn require_answer(&self, answer_id: i64) -> Result<Answer, QuestionDeskError> {
        self.answers
            .find_by_id(answer_id)
            .await?
            .ok_or(QuestionDeskError::AnswerNotFound { answer_id })
    }

    /// Check that the backing database answers queries
    pub async fn health_check(&self) -> Result<(), QuestionDeskError> {
        match &self.pool {
            Some(pool) => health_check(pool).await,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService")
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}
