//! Authentication service implementation
//!
//! This service resolves the caller of a request from its session token
//! (an HS256 JWT whose subject is the user id) and determines whether the
//! caller holds the administrator role.

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::AuthConfig;
use crate::database::UserStore;
use crate::models::User;
use crate::utils::errors::{QuestionDeskError, Result};

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub user: User,
    pub is_admin: bool,
}

impl AuthContext {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }
}

/// Authentication service for resolving request identities
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    administrator_role: String,
    users: Arc<dyn UserStore>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &AuthConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            administrator_role: config.administrator_role.clone(),
            users,
        }
    }

    /// Name of the role whose members administer questions
    pub fn administrator_role(&self) -> &str {
        &self.administrator_role
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user_id: i64, ttl: Duration) -> Result<String> {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify a session token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Resolve the caller from an `Authorization` header value.
    ///
    /// No header means an anonymous caller. A header that is not a valid bearer
    /// token, or whose user no longer exists, is an authentication error.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Option<AuthContext>> {
        let Some(header) = authorization else {
            return Ok(None);
        };

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| QuestionDeskError::Authentication("Expected a bearer token".to_string()))?;

        let claims = self.verify_token(token)?;
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| QuestionDeskError::Authentication("Unknown session user".to_string()))?;

        let is_admin = user.has_role(&self.administrator_role);
        debug!(user_id = user.id, is_admin = is_admin, "Request authenticated");

        Ok(Some(AuthContext { user, is_admin }))
    }
}
