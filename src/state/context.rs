//! Application context
//!
//! Everything a request handler needs, shared by all connections.

use std::sync::Arc;
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::services::{AuthService, JobQueue};
use crate::urls::Urls;
use crate::utils::errors::Result;

/// Application-wide context containing services and settings
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub database: DatabaseService,
    pub auth: AuthService,
    pub queue: Arc<dyn JobQueue>,
    pub urls: Urls,
}

impl AppContext {
    /// Create a new AppContext from its services
    pub fn new(settings: Settings, database: DatabaseService, queue: Arc<dyn JobQueue>) -> Result<Self> {
        let auth = AuthService::new(&settings.auth, database.users.clone());
        let urls = Urls::new(&settings.server)?;

        Ok(Self {
            settings: Arc::new(settings),
            database,
            auth,
            queue,
            urls,
        })
    }

    /// Name of the role whose members administer questions and receive reports
    pub fn administrator_role(&self) -> &str {
        self.auth.administrator_role()
    }
}
