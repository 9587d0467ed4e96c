//! In-memory implementation of every store trait

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use chrono::Utc;
use question_desk::database::{AnswerStore, QuestionStore, UserStore};
use question_desk::models::{Answer, Question, QuestionRequest, User};
use question_desk::Result;

#[derive(Default)]
struct MemoryState {
    questions: BTreeMap<i64, Question>,
    answers: BTreeMap<i64, Answer>,
    users: BTreeMap<i64, User>,
    next_question_id: i64,
    next_answer_id: i64,
}

/// Shared in-memory tables. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.state.lock().unwrap().users.insert(user.id, user);
    }

    /// Insert a question row directly, bypassing the handlers
    pub fn insert_question(&self, request: QuestionRequest) -> Question {
        let mut state = self.state.lock().unwrap();
        state.next_question_id += 1;
        let now = Utc::now();
        let question = Question {
            id: state.next_question_id,
            content: request.content,
            description: request.description,
            icon_name: request.icon_name,
            short_name: request.short_name,
            question_type: request.question_type,
            free_response: request.free_response,
            created_at: now,
            updated_at: now,
        };
        state.questions.insert(question.id, question.clone());
        question
    }

    /// Insert an answer with a fixed id
    pub fn insert_answer(&self, id: i64, question_id: i64, club_id: i64, content: &str) -> Answer {
        let mut state = self.state.lock().unwrap();
        state.next_answer_id = state.next_answer_id.max(id);
        let answer = Answer {
            id,
            content: content.to_string(),
            question_id,
            club_id,
            user_id: None,
            created_at: Utc::now(),
        };
        state.answers.insert(id, answer.clone());
        answer
    }

    pub fn question_count(&self) -> usize {
        self.state.lock().unwrap().questions.len()
    }

    pub fn answer_count(&self) -> usize {
        self.state.lock().unwrap().answers.len()
    }

    pub fn question(&self, id: i64) -> Option<Question> {
        self.state.lock().unwrap().questions.get(&id).cloned()
    }

    pub fn answer(&self, id: i64) -> Option<Answer> {
        self.state.lock().unwrap().answers.get(&id).cloned()
    }

    pub fn questions(&self) -> Vec<Question> {
        self.state.lock().unwrap().questions.values().cloned().collect()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn create(&self, request: QuestionRequest) -> Result<Question> {
        Ok(self.insert_question(request))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Question>> {
        Ok(self.question(id))
    }

    async fn list(&self) -> Result<Vec<Question>> {
        Ok(self.questions())
    }

    async fn update(&self, id: i64, request: QuestionRequest) -> Result<Option<Question>> {
        let mut state = self.state.lock().unwrap();
        let Some(question) = state.questions.get_mut(&id) else {
            return Ok(None);
        };

        question.content = request.content;
        question.description = request.description;
        question.icon_name = request.icon_name;
        question.short_name = request.short_name;
        question.question_type = request.question_type;
        question.free_response = request.free_response;
        question.updated_at = Utc::now();
        Ok(Some(question.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        if state.questions.remove(&id).is_none() {
            return Ok(false);
        }
        state.answers.retain(|_, answer| answer.question_id != id);
        Ok(true)
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Answer>> {
        Ok(self.answer(id))
    }

    async fn list_for_question(&self, question_id: i64) -> Result<Vec<Answer>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .answers
            .values()
            .filter(|answer| answer.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.state.lock().unwrap().answers.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_role(&self, role_name: &str) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .filter(|user| user.has_role(role_name))
            .cloned()
            .collect())
    }
}
