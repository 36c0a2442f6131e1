//! Per-client-IP request quotas backed by `governor` keyed limiters.

use crate::errors::HttpError;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    DefaultKeyedRateLimiter, Quota, RateLimiter,
    clock::{Clock, DefaultClock},
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Requests a limiter counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitScope {
    All,
    /// Everything except GET, HEAD and OPTIONS
    Writes,
    Method(Method),
}

/// A named quota of `max` requests per `window` for each client IP.
#[derive(Clone)]
pub struct RateLimit {
    name: &'static str,
    message: Arc<str>,
    scope: RateLimitScope,
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl RateLimit {
    /// Allows bursts of up to `max` requests; capacity refills evenly over `window`,
    /// one request every `window / max`.
    ///
    /// This is a sliding budget rather than a fixed window: a client that
    /// drains the burst gets its next request after `window / max`, not after
    /// the whole `window`.
    pub fn new(name: &'static str, max: u32, window: Duration, message: &str) -> Self {
        let burst = NonZeroU32::new(max).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .map(|quota| quota.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(burst));

        Self {
            name,
            message: Arc::from(message),
            scope: RateLimitScope::All,
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    pub fn with_scope(mut self, scope: RateLimitScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn applies_to(&self, method: &Method) -> bool {
        match &self.scope {
            RateLimitScope::All => true,
            RateLimitScope::Writes => {
                !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
            }
            RateLimitScope::Method(only) => only == method,
        }
    }

    /// Take one unit for `ip`; on refusal, returns how long until the next one.
    pub fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        self.limiter
            .check_key(&ip)
            .map_err(|not_until| not_until.wait_time_from(DefaultClock::default().now()))
    }

    /// Drop state for clients whose quota has fully refilled.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }
}

/// Client address: socket peer, then the first `X-Forwarded-For` hop, then unspecified.
pub fn client_ip(request: &Request) -> IpAddr {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Middleware enforcing one [`RateLimit`]; rejections are 429 with `Retry-After`.
pub async fn rate_limit(State(limit): State<RateLimit>, request: Request, next: Next) -> Response {
    if !limit.applies_to(request.method()) {
        return next.run(request).await;
    }

    let ip = client_ip(&request);
    match limit.check(ip) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            tracing::warn!(limiter = limit.name(), %ip, retry_after_secs = wait.as_secs(), "Rate limit exceeded");
            let mut response = HttpError::too_many_requests(limit.message.as_ref()).into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(wait.as_secs().max(1)),
            );
            response
        }
    }
}
