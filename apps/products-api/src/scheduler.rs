//! Nightly product cleanup.
//!
//! At 00:00 UTC every product is removed and ids restart at 1. A failed run
//! is logged and the job stays scheduled for the next midnight.

use chrono::{DateTime, Days, Utc};
use domain_products::{ProductRepository, ProductResult, ProductService};
use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{error, info, warn};

/// Every day at midnight (sec min hour day month weekday)
pub const CLEANUP_SCHEDULE: &str = "0 0 0 * * *";

/// Time from `now` until the next UTC midnight, in `(0, 24h]`.
pub fn duration_until_next_midnight(now: DateTime<Utc>) -> Duration {
    let next_midnight = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc());

    match next_midnight {
        Some(next) => (next - now).to_std().unwrap_or(Duration::from_secs(24 * 60 * 60)),
        None => Duration::from_secs(24 * 60 * 60),
    }
}

/// `"{h}h {m}m"`
pub fn format_remaining(remaining: Duration) -> String {
    let minutes = remaining.as_secs() / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// One cleanup cycle; returns how many products were removed.
pub async fn run_cleanup<R: ProductRepository>(products: &ProductService<R>) -> ProductResult<u64> {
    let count = products.count_products().await?;
    if count == 0 {
        info!("Automatic cleanup: nothing to clean");
        return Ok(0);
    }

    let removed = products.clear_products().await?;
    info!(removed, "Automatic cleanup: products table truncated, ids restarted at 1");
    Ok(removed)
}

/// Log the current product count and when the next cleanup runs.
pub async fn check_on_startup<R: ProductRepository>(products: &ProductService<R>) {
    let next_run = format_remaining(duration_until_next_midnight(Utc::now()));
    match products.count_products().await {
        Ok(count) => info!(count, next_run = %next_run, "Automatic cleanup scheduled"),
        Err(e) => warn!(error = %e, next_run = %next_run, "Could not count products at startup"),
    }
}

/// Start the cleanup job when `enabled`; otherwise log that it is off.
///
/// The returned scheduler must be shut down with the server.
pub async fn start<R: ProductRepository + 'static>(
    products: ProductService<R>,
    enabled: bool,
) -> Result<Option<JobScheduler>, JobSchedulerError> {
    if !enabled {
        info!("Automatic cleanup disabled (set ENABLE_AUTO_CLEANUP=true or run in production)");
        return Ok(None);
    }

    check_on_startup(&products).await;

    let sched = JobScheduler::new().await?;
    let job = Job::new_async(CLEANUP_SCHEDULE, move |_uuid, _l| {
        let products = products.clone();

        Box::pin(async move {
            info!("Running scheduled product cleanup");
            if let Err(e) = run_cleanup(&products).await {
                error!(error = %e, "Scheduled product cleanup failed");
            }
        })
    })?;

    sched.add(job).await?;
    sched.start().await?;
    info!(cron = CLEANUP_SCHEDULE, "Cleanup scheduler started");

    Ok(Some(sched))
}

/// Stop the scheduler, logging instead of failing.
pub async fn stop(mut sched: JobScheduler) {
    match sched.shutdown().await {
        Ok(()) => info!("Cleanup scheduler stopped"),
        Err(e) => warn!(error = %e, "Failed to stop cleanup scheduler"),
    }
}
