use crate::errors::HttpError;
use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, header, header::InvalidHeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parse a comma-separated origin list, skipping blanks.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').parse::<HeaderValue>())
        .collect()
}

/// CORS layer answering preflights for the given origins.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}

/// Origins accepted by [`reject_foreign_origin`].
#[derive(Clone, Debug)]
pub struct AllowedOrigins(Arc<Vec<HeaderValue>>);

impl AllowedOrigins {
    pub fn new(origins: Vec<HeaderValue>) -> Self {
        Self(Arc::new(origins))
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }
}

/// Fail requests whose `Origin` is not allowed with a generic error.
///
/// Requests without an `Origin` header (curl, server-to-server, same-origin
/// navigation) pass through.
pub async fn reject_foreign_origin(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !allowed.allows(origin) {
            tracing::warn!(origin = ?origin, "Rejected request from disallowed origin");
            return HttpError::internal("Error de CORS").into_response();
        }
    }

    next.run(request).await
}
