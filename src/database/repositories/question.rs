//! Question repository implementation

use std::time::Instant;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use crate::database::store::QuestionStore;
use crate::models::question::{Question, QuestionRequest};
use crate::utils::errors::QuestionDeskError;
use crate::utils::logging::log_database_operation;

const QUESTION_COLUMNS: &str =
    "id, content, description, icon_name, short_name, type, free_response, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionStore for QuestionRepository {
    /// Create a new question
    async fn create(&self, request: QuestionRequest) -> Result<Question, QuestionDeskError> {
        let now = Utc::now();
        let question = sqlx::query_as::<_, Question>(&format!(
            r#"
            INSERT INTO questions (content, description, icon_name, short_name, type, free_response, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(request.content)
        .bind(request.description)
        .bind(request.icon_name)
        .bind(request.short_name)
        .bind(request.question_type.as_str())
        .bind(request.free_response)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }

    /// Find question by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Question>, QuestionDeskError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    /// List all questions
    async fn list(&self) -> Result<Vec<Question>, QuestionDeskError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Overwrite every field of a question
    async fn update(&self, id: i64, request: QuestionRequest) -> Result<Option<Question>, QuestionDeskError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            r#"
            UPDATE questions
            SET content = $2,
                description = $3,
                icon_name = $4,
                short_name = $5,
                type = $6,
                free_response = $7,
                updated_at = $8
            WHERE id = $1
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.content)
        .bind(request.description)
        .bind(request.icon_name)
        .bind(request.short_name)
        .bind(request.question_type.as_str())
        .bind(request.free_response)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    /// Delete a question together with its answers
    async fn delete(&self, id: i64) -> Result<bool, QuestionDeskError> {
        let started = Instant::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        log_database_operation("delete", "questions", started.elapsed().as_millis() as u64, true);
        Ok(result.rows_affected() > 0)
    }
}
