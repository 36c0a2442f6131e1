//! Per-IP quotas for the `/api` surface.

use axum::http::Method;
use axum_helpers::ShutdownCoordinator;
use axum_helpers::http::{RateLimit, RateLimitScope};
use std::time::Duration;
use tracing::debug;

const FIFTEEN_MINUTES: Duration = Duration::from_secs(15 * 60);
const ONE_HOUR: Duration = Duration::from_secs(60 * 60);
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

pub const GENERAL_MESSAGE: &str =
    "Demasiadas peticiones desde esta IP, por favor intente de nuevo más tarde.";
pub const WRITES_MESSAGE: &str =
    "Demasiadas operaciones de escritura desde esta IP, por favor intente de nuevo más tarde.";
pub const CREATE_MESSAGE: &str = "Ha alcanzado el límite de creación de productos por hora.";

#[derive(Clone)]
pub struct RateLimits {
    /// Every request under `/api`
    pub general: RateLimit,
    /// Non-read requests under `/api/products`
    pub writes: RateLimit,
    /// `POST /api/products`
    pub create: RateLimit,
}

impl RateLimits {
    pub fn with_quotas(general: u32, writes: u32, create: u32) -> Self {
        Self {
            general: RateLimit::new("general", general, FIFTEEN_MINUTES, GENERAL_MESSAGE),
            writes: RateLimit::new("writes", writes, FIFTEEN_MINUTES, WRITES_MESSAGE)
                .with_scope(RateLimitScope::Writes),
            create: RateLimit::new("create", create, ONE_HOUR, CREATE_MESSAGE)
                .with_scope(RateLimitScope::Method(Method::POST)),
        }
    }

    pub fn prune(&self) {
        self.general.prune();
        self.writes.prune();
        self.create.prune();
    }

    /// Prune limiter state every minute until shutdown.
    pub fn spawn_pruning(&self, coordinator: ShutdownCoordinator) {
        let limits = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PRUNE_INTERVAL);
            loop {
                tokio::select! {
                    _ = interval.tick() => limits.prune(),
                    _ = coordinator.wait() => break,
                }
            }
            debug!("Rate limit pruning stopped");
        });
    }
}

impl Default for RateLimits {
    /// 100 requests / 15 min, 50 writes / 15 min, 20 creates / hour.
    fn default() -> Self {
        Self::with_quotas(100, 50, 20)
    }
}
