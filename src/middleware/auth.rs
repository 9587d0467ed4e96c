//! Authorization guards
//!
//! Every handler calls one of these before touching storage, so a rejected
//! caller never causes a side effect.

use tracing::{debug, warn};
use crate::services::AuthContext;
use crate::utils::errors::{QuestionDeskError, Result};

/// Require an authenticated caller
pub fn require_login(caller: Option<&AuthContext>) -> Result<&AuthContext> {
    caller.ok_or_else(|| QuestionDeskError::Authentication("Login required".to_string()))
}

/// Require an authenticated caller holding the administrator role
pub fn require_admin(caller: Option<&AuthContext>) -> Result<&AuthContext> {
    let caller = require_login(caller)?;

    if caller.is_admin {
        debug!(user_id = caller.user_id(), "Admin authorization successful");
        Ok(caller)
    } else {
        warn!(user_id = caller.user_id(), "Unauthorized admin access attempt");
        Err(QuestionDeskError::PermissionDenied(
            "Admin privileges required".to_string()
        ))
    }
}
