use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Body produced by the terminal error handler.
///
/// `status` is `"fail"` for 4xx responses and `"error"` otherwise.
/// `stack` is only filled in development.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HttpErrorBody {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// An error that carries its own HTTP status and is rendered by the terminal
/// error handler rather than by the route that raised it.
///
/// Converting it into a response stores a copy in the response extensions so
/// [`error_handler`](super::handlers::error_handler) can log it and attach the
/// stack when running in development.
#[derive(Debug, Clone)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    stack: Option<String>,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            stack: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub fn route_not_found(uri: &Uri) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Ruta no encontrada - {}", uri))
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_label(&self) -> &'static str {
        if self.status.is_client_error() {
            "fail"
        } else {
            "error"
        }
    }

    /// Stack text, falling back to the error line itself.
    pub fn stack(&self) -> String {
        self.stack
            .clone()
            .unwrap_or_else(|| format!("HttpError [{}]: {}", self.status.as_u16(), self.message))
    }

    pub fn body(&self, include_stack: bool) -> HttpErrorBody {
        HttpErrorBody {
            status: self.status_label().to_string(),
            message: self.message.clone(),
            stack: include_stack.then(|| self.stack()),
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body(false))).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_label_by_class() {
        assert_eq!(HttpError::bad_request("x").status_label(), "fail");
        assert_eq!(HttpError::too_many_requests("x").status_label(), "fail");
        assert_eq!(HttpError::internal("x").status_label(), "error");
    }

    #[test]
    fn test_route_not_found_message() {
        let uri: Uri = "/api/unknown?x=1".parse().unwrap();
        let error = HttpError::route_not_found(&uri);
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.message(), "Ruta no encontrada - /api/unknown?x=1");
    }

    #[test]
    fn test_body_omits_stack_unless_requested() {
        let error = HttpError::internal("boom");
        assert!(error.body(false).stack.is_none());
        assert_eq!(error.body(true).stack.as_deref(), Some("HttpError [500]: boom"));

        let json = serde_json::to_value(error.body(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "boom" }));
    }

    #[test]
    fn test_into_response_keeps_report_in_extensions() {
        let response = HttpError::bad_request("JSON inválido").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let report = response.extensions().get::<HttpError>().unwrap();
        assert_eq!(report.message(), "JSON inválido");
    }
}
