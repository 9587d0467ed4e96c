//! Response encoding
//!
//! Pages become JSON documents naming their template; redirects become
//! `303 See Other`; errors carry their public message.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE, LOCATION, WWW_AUTHENTICATE};
use hyper::{Response, StatusCode};
use serde_json::json;
use tracing::{error, info, warn};
use crate::handlers::{Outcome, View};
use crate::utils::errors::{ErrorSeverity, QuestionDeskError};

pub type HttpResponse = Response<Full<Bytes>>;

fn json_response(status: StatusCode, body: &serde_json::Value) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => {
            let mut response = Response::new(Full::new(Bytes::from(bytes)));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize response body");
            let mut response = Response::new(Full::new(Bytes::from_static(b"Internal server error")));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

/// Encode a rendered page
pub fn view_response(view: &View) -> HttpResponse {
    let body = json!({
        "template": view.page.template(),
        "context": view.page,
        "flashes": view.flashes,
    });
    json_response(view.status(), &body)
}

/// Encode any handler outcome
pub fn outcome_response(outcome: &Outcome) -> HttpResponse {
    match outcome {
        Outcome::Render(view) => view_response(view),
        Outcome::Redirect(redirect) => {
            let location = match HeaderValue::from_str(&redirect.location) {
                Ok(location) => location,
                Err(_) => {
                    return error_response(&QuestionDeskError::InvalidInput(format!(
                        "Unencodable redirect target: {}",
                        redirect.location
                    )))
                }
            };

            let body = json!({
                "location": redirect.location,
                "flashes": redirect.flashes,
            });
            let mut response = json_response(StatusCode::SEE_OTHER, &body);
            response.headers_mut().insert(LOCATION, location);
            response
        }
    }
}

/// Encode an error, logging it at its severity
pub fn error_response(err: &QuestionDeskError) -> HttpResponse {
    match err.severity() {
        ErrorSeverity::Info => info!(error = %err, "Request rejected"),
        ErrorSeverity::Warning => warn!(error = %err, "Request refused"),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(error = %err, severity = %err.severity(), "Request failed")
        }
    }

    let status = err.status_code();
    let mut response = json_response(status, &json!({ "error": err.public_message() }));
    if status == StatusCode::UNAUTHORIZED {
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    }
    response
}

/// Response for a status with no handler behind it
pub fn status_response(status: StatusCode) -> HttpResponse {
    let message = status.canonical_reason().unwrap_or("Error");
    json_response(status, &json!({ "error": message }))
}

/// Body of the health endpoint
pub fn health_response(healthy: bool) -> HttpResponse {
    if healthy {
        json_response(StatusCode::OK, &json!({ "status": "ok" }))
    } else {
        json_response(StatusCode::SERVICE_UNAVAILABLE, &json!({ "status": "unavailable" }))
    }
}
