//! HTTP server
//!
//! A hyper HTTP/1 accept loop. Each request body is collected up front and
//! the request is dispatched to its handler inside a request span.

pub mod response;
pub mod router;

use std::convert::Infallible;
use std::future::Future;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, info, warn, Instrument};
use crate::forms::QuestionForm;
use crate::handlers::{self, Outcome};
use crate::middleware::{request_span, require_admin, RequestTimer};
use crate::state::AppContext;
use crate::utils::errors::{QuestionDeskError, Result};

pub use response::HttpResponse;
pub use router::{resolve, Route, RouteMatch};

/// Largest request body accepted
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Accept connections until `shutdown` resolves
pub async fn serve(app: AppContext, listener: TcpListener, shutdown: impl Future<Output = ()>) -> Result<()> {
    tokio::pin!(shutdown);
    info!(address = ?listener.local_addr()?, "HTTP server listening");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, remote) = match accepted {
                    Ok(connection) => connection,
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                        continue;
                    }
                };

                let app = app.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let app = app.clone();
                        async move { Ok::<_, Infallible>(handle(&app, req).await) }
                    });

                    if let Err(e) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        debug!(remote = %remote, error = %e, "Connection closed with error");
                    }
                });
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received, no longer accepting connections");
                break;
            }
        }
    }

    Ok(())
}

async fn handle(app: &AppContext, req: Request<Incoming>) -> HttpResponse {
    let (parts, body) = req.into_parts();
    let bytes = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return response::error_response(&QuestionDeskError::InvalidInput(format!(
                "Unreadable request body: {}",
                e
            )))
        }
    };

    dispatch(app, Request::from_parts(parts, bytes)).await
}

/// Route a fully read request and produce its response
pub async fn dispatch(app: &AppContext, req: Request<Bytes>) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let timer = RequestTimer::start(&method, &path);

    let response = route_request(app, req)
        .instrument(request_span(&method, &path))
        .await;

    timer.finish(response.status());
    response
}

async fn route_request(app: &AppContext, req: Request<Bytes>) -> HttpResponse {
    let route = match resolve(app.urls.prefix(), req.method(), req.uri().path()) {
        RouteMatch::Found(route) => route,
        RouteMatch::MethodNotAllowed => return response::status_response(StatusCode::METHOD_NOT_ALLOWED),
        RouteMatch::NotFound => return response::status_response(StatusCode::NOT_FOUND),
    };

    if route == Route::Health {
        return match app.database.health_check().await {
            Ok(()) => response::health_response(true),
            Err(e) => {
                warn!(error = %e, "Health check failed");
                response::health_response(false)
            }
        };
    }

    match run_route(app, route, req).await {
        Ok(outcome) => response::outcome_response(&outcome),
        Err(e) => response::error_response(&e),
    }
}

/// Parse the urlencoded form a POST carries
fn submitted_form(req: &Request<Bytes>) -> Result<QuestionForm> {
    if let Some(content_type) = req.headers().get(CONTENT_TYPE) {
        let content_type = content_type.to_str().unwrap_or_default();
        if !content_type.starts_with("application/x-www-form-urlencoded") {
            return Err(QuestionDeskError::InvalidInput(format!(
                "Unsupported content type: {}",
                content_type
            )));
        }
    }

    Ok(QuestionForm::from_urlencoded(req.body()))
}

async fn run_route(app: &AppContext, route: Route, req: Request<Bytes>) -> Result<Outcome> {
    let authorization = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            QuestionDeskError::Authentication("Authorization header is not valid text".to_string())
        })?),
        None => None,
    };
    let caller = app.auth.authenticate(authorization).await?;
    let caller = caller.as_ref();
    // Form routes are admin only; refuse the caller before reading the body
    let form = if req.method() == Method::POST {
        require_admin(caller)?;
        Some(submitted_form(&req)?)
    } else {
        None
    };

    match route {
        Route::NewQuestion => handlers::new_question(app, caller, form).await,
        Route::Questions => handlers::questions(app, caller).await,
        Route::QuestionInfo(id) => handlers::question_info(app, caller, id).await,
        Route::ChangeQuestionDetails(id) => handlers::change_question_details(app, caller, id, form).await,
        Route::DeleteQuestionRequest(id) => handlers::delete_question_request(app, caller, id).await,
        Route::DeleteQuestion(id) => handlers::delete_question(app, caller, id).await,
        Route::DeleteAnswer(id) => handlers::delete_answer(app, caller, id).await,
        Route::FlagAnswer(id) => handlers::flag_answer(app, caller, id).await,
        Route::Health => Err(QuestionDeskError::InvalidInput("Health is not a page".to_string())),
    }
}
