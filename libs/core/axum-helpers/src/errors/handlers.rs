//! Terminal error handling: the unmatched-route fallback, the error
//! middleware and the panic responder.

use axum::{
    body::Body,
    extract::{OriginalUri, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::Environment;
use std::any::Any;

use super::HttpError;

/// Fallback for requests that match no route.
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> HttpError {
    HttpError::route_not_found(&uri)
}

/// State for [`error_handler`].
#[derive(Clone, Copy, Debug)]
pub struct ErrorHandlerConfig {
    pub environment: Environment,
}

impl ErrorHandlerConfig {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

/// Middleware that finalizes every [`HttpError`] response.
///
/// Logs the error (except under `test`) and, in development only, rewrites
/// the body to include the stack.
pub async fn error_handler(
    State(config): State<ErrorHandlerConfig>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;

    let Some(report) = response.extensions().get::<HttpError>().cloned() else {
        return response;
    };

    if !config.environment.is_test() {
        let status = report.status().as_u16();
        if report.status().is_server_error() {
            tracing::error!(status, %method, %uri, stack = %report.stack(), "{}", report.message());
        } else {
            tracing::warn!(status, %method, %uri, "{}", report.message());
        }
    }

    if !config.environment.is_development() {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    match serde_json::to_vec(&report.body(true)) {
        Ok(bytes) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize error body");
            report.into_response()
        }
    }
}

/// Response for a handler panic, used with `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    HttpError::internal("Error interno del servidor")
        .with_stack(format!("panic: {}", detail))
        .into_response()
}
