//! Mail queue that records submissions instead of delivering them

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use question_desk::services::{EmailJob, JobQueue};
use question_desk::{QuestionDeskError, Result};

#[derive(Default)]
pub struct RecordingQueue {
    jobs: Mutex<Vec<EmailJob>>,
    refuse: AtomicBool,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following submission fail
    pub fn refuse_jobs(&self) {
        self.refuse.store(true, Ordering::SeqCst);
    }

    pub fn jobs(&self) -> Vec<EmailJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl JobQueue for RecordingQueue {
    fn enqueue(&self, job: EmailJob) -> Result<()> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(QuestionDeskError::QueueUnavailable("mail queue is full".to_string()));
        }
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}
