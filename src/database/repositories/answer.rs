//! Answer repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::store::AnswerStore;
use crate::models::answer::Answer;
use crate::utils::errors::QuestionDeskError;

#[derive(Clone, Debug)]
pub struct AnswerRepository {
    pool: PgPool,
}

impl AnswerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerStore for AnswerRepository {
    /// Find answer by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Answer>, QuestionDeskError> {
        let answer = sqlx::query_as::<_, Answer>(
            "SELECT id, content, question_id, club_id, user_id, created_at FROM answers WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    /// Answers given to a question
    async fn list_for_question(&self, question_id: i64) -> Result<Vec<Answer>, QuestionDeskError> {
        let answers = sqlx::query_as::<_, Answer>(
            "SELECT id, content, question_id, club_id, user_id, created_at FROM answers WHERE question_id = $1 ORDER BY id ASC"
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }

    /// Delete answer
    async fn delete(&self, id: i64) -> Result<bool, QuestionDeskError> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
