//! Background task that deletes stale uploads

use std::sync::Arc;
use std::time::{Duration, SystemTime};
use storage::{RetentionPolicy, Storage, SweepReport};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Start the collector. The first pass runs immediately, later passes
/// follow every `interval` for the life of the process.
pub fn spawn(
    storage: Arc<dyn Storage>,
    policy: RetentionPolicy,
    interval: Duration,
) -> JoinHandle<()> {
    info!(
        max_age_secs = policy.max_age.as_secs(),
        interval_secs = interval.as_secs(),
        "Starting file collector"
    );

    tokio::spawn(async move {
        loop {
            run_pass(storage.as_ref(), &policy).await;
            tokio::time::sleep(interval).await;
        }
    })
}

/// Run one collection pass. A pass that cannot list the directory is
/// logged and abandoned; the next one starts on schedule.
pub async fn run_pass(storage: &dyn Storage, policy: &RetentionPolicy) -> Option<SweepReport> {
    info!("Starting file collection");

    match storage.collect_garbage(policy, SystemTime::now()).await {
        Ok(report) => {
            info!(
                scanned = report.scanned,
                removed = report.removed,
                kept = report.kept,
                skipped = report.skipped,
                failed = report.failed,
                "File collection finished"
            );
            Some(report)
        }
        Err(e) => {
            error!("Collection pass aborted: {:#}", e);
            None
        }
    }
}
