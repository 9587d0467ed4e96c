//! Path routing
//!
//! Maps a method and path onto a [`Route`]. Question routes live under the
//! configured prefix; ids are unsigned decimal integers.

use hyper::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    NewQuestion,
    Questions,
    QuestionInfo(i64),
    ChangeQuestionDetails(i64),
    DeleteQuestionRequest(i64),
    DeleteQuestion(i64),
    DeleteAnswer(i64),
    FlagAnswer(i64),
}

impl Route {
    /// Whether the route accepts a form submission
    pub fn accepts_post(&self) -> bool {
        matches!(self, Route::NewQuestion | Route::ChangeQuestionDetails(_))
    }

    /// Whether a GET changes nothing. Only these routes answer HEAD.
    pub fn is_read_only(&self) -> bool {
        !matches!(
            self,
            Route::DeleteQuestion(_) | Route::DeleteAnswer(_) | Route::FlagAnswer(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Route),
    MethodNotAllowed,
    NotFound,
}

fn parse_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn match_path(prefix: &str, path: &str) -> Option<Route> {
    if path == "/health" {
        return Some(Route::Health);
    }

    let rest = path.strip_prefix(prefix)?;
    let rest = rest.strip_prefix('/')?;
    let segments: Vec<&str> = rest.split('/').collect();

    let route = match segments.as_slice() {
        ["new-question"] => Route::NewQuestion,
        ["questions"] => Route::Questions,
        ["answer", id, "_delete"] => Route::DeleteAnswer(parse_id(id)?),
        ["answer", id, "flag"] => Route::FlagAnswer(parse_id(id)?),
        [id] | [id, "info"] => Route::QuestionInfo(parse_id(id)?),
        [id, "change-question-details"] => Route::ChangeQuestionDetails(parse_id(id)?),
        [id, "delete"] => Route::DeleteQuestionRequest(parse_id(id)?),
        [id, "_delete"] => Route::DeleteQuestion(parse_id(id)?),
        _ => return None,
    };

    Some(route)
}

/// Resolve a request against the route table
pub fn resolve(prefix: &str, method: &Method, path: &str) -> RouteMatch {
    let Some(route) = match_path(prefix, path) else {
        return RouteMatch::NotFound;
    };

    let allowed = *method == Method::GET
        || (*method == Method::HEAD && route.is_read_only())
        || (*method == Method::POST && route.accepts_post());

    if allowed {
        RouteMatch::Found(route)
    } else {
        RouteMatch::MethodNotAllowed
    }
}
