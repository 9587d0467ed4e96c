//! User and role models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user together with the name of the role it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub role_id: Option<i64>,
    pub role_name: Option<String>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.role_name.as_deref() == Some(role)
    }
}
