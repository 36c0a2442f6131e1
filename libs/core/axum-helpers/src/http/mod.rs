//! HTTP middleware: CORS, security headers and per-IP rate limiting.

pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::{AllowedOrigins, create_cors_layer, parse_origins, reject_foreign_origin};
pub use rate_limit::{RateLimit, RateLimitScope, client_ip, rate_limit};
pub use security::security_headers;
