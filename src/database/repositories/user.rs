//! User repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::store::UserStore;
use crate::models::user::User;
use crate::utils::errors::QuestionDeskError;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, QuestionDeskError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.first_name, u.last_name, u.role_id, r.name AS role_name
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find every user holding a role
    async fn find_by_role(&self, role_name: &str) -> Result<Vec<User>, QuestionDeskError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.first_name, u.last_name, u.role_id, r.name AS role_name
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE r.name = $1
            ORDER BY u.id ASC
            "#
        )
        .bind(role_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
