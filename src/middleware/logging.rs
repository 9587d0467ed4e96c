//! Request logging
//!
//! Every request runs inside a span carrying a fresh request id, and ends with
//! one access log line.

use std::time::Instant;
use hyper::{Method, StatusCode};
use tracing::{info_span, Span};
use crate::utils::helpers::generate_request_id;
use crate::utils::logging::log_request;

/// Span wrapping the handling of a single request
pub fn request_span(method: &Method, path: &str) -> Span {
    info_span!(
        "request",
        method = %method,
        path = %path,
        request_id = %generate_request_id(),
    )
}

/// Measures a request and writes its access log line
#[derive(Debug)]
pub struct RequestTimer {
    started: Instant,
    method: Method,
    path: String,
}

impl RequestTimer {
    pub fn start(method: &Method, path: &str) -> Self {
        Self {
            started: Instant::now(),
            method: method.clone(),
            path: path.to_string(),
        }
    }

    pub fn finish(self, status: StatusCode) {
        log_request(
            self.method.as_str(),
            &self.path,
            status.as_u16(),
            self.started.elapsed().as_millis() as u64,
        );
    }
}
