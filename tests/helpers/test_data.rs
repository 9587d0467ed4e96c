//! Test data helpers
//!
//! Builds an [`AppContext`] over the in-memory store and recording queue,
//! with two administrators and one ordinary member already registered.

use std::sync::Arc;
use chrono::Duration;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use question_desk::config::Settings;
use question_desk::database::DatabaseService;
use question_desk::forms::QuestionForm;
use question_desk::models::{QuestionRequest, QuestionType, User};
use question_desk::services::AuthContext;
use question_desk::state::AppContext;
use super::{MemoryStore, RecordingQueue};

pub const ADMIN_ID: i64 = 1;
pub const SECOND_ADMIN_ID: i64 = 2;
pub const MEMBER_ID: i64 = 3;

pub const TEST_JWT_SECRET: &str = "test-secret-for-question-desk";
pub const TEST_BASE_URL: &str = "https://clubs.example.org";

/// Settings pointing at nothing real
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.server.public_base_url = TEST_BASE_URL.to_string();
    settings.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    settings
}

/// A user with generated contact details
pub fn create_test_user(id: i64, first_name: &str, role: Option<&str>) -> User {
    User {
        id,
        email: SafeEmail().fake(),
        first_name: first_name.to_string(),
        last_name: Some(LastName().fake()),
        role_id: role.map(|name| if name == "Administrator" { 2 } else { 1 }),
        role_name: role.map(str::to_string),
    }
}

/// A question request that passes validation
pub fn sample_request() -> QuestionRequest {
    QuestionRequest {
        content: "Favorite color?".to_string(),
        description: "Pick the one you like most".to_string(),
        icon_name: "paint-brush".to_string(),
        short_name: "favorite_color".to_string(),
        question_type: QuestionType::SingleChoice,
        free_response: false,
    }
}

/// A submitted form that passes validation
pub fn valid_form(content: &str) -> QuestionForm {
    QuestionForm {
        content: content.to_string(),
        description: "Asked on every club page".to_string(),
        icon_name: "star".to_string(),
        short_name: "club-rating".to_string(),
        question_type: "rating".to_string(),
        free_response: "y".to_string(),
    }
}

/// Everything a handler test needs
pub struct TestApp {
    pub app: AppContext,
    pub store: MemoryStore,
    pub queue: Arc<RecordingQueue>,
    pub admin: AuthContext,
    pub second_admin: AuthContext,
    pub member: AuthContext,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let store = MemoryStore::new();
        let admin_user = create_test_user(ADMIN_ID, "Ada", Some("Administrator"));
        let second_admin_user = create_test_user(SECOND_ADMIN_ID, &FirstName().fake::<String>(), Some("Administrator"));
        let member_user = create_test_user(MEMBER_ID, "Mia", Some("User"));
        store.add_user(admin_user.clone());
        store.add_user(second_admin_user.clone());
        store.add_user(member_user.clone());

        let shared = Arc::new(store.clone());
        let database = DatabaseService::from_stores(shared.clone(), shared.clone(), shared);
        let queue = Arc::new(RecordingQueue::new());
        let app = AppContext::new(settings, database, queue.clone()).expect("test context builds");

        Self {
            app,
            store,
            queue,
            admin: AuthContext { user: admin_user, is_admin: true },
            second_admin: AuthContext { user: second_admin_user, is_admin: true },
            member: AuthContext { user: member_user, is_admin: false },
        }
    }

    /// Bearer header value for a registered user
    pub fn bearer(&self, user_id: i64) -> String {
        let token = self
            .app
            .auth
            .issue_token(user_id, Duration::hours(1))
            .expect("token issues");
        format!("Bearer {}", token)
    }
}
