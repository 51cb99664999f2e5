// src/pipeline/run.rs

//! Sequential run driver.

use std::time::Duration;

use async_trait::async_trait;

use crate::logging::Logger;
use crate::models::Config;
use crate::pipeline::process::{process_target, ProcessOptions};
use crate::services::Fetcher;

/// Injectable suspension point so tests can drive the loop without real
/// elapsed time.
#[async_trait]
pub trait Sleep: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleep;

#[async_trait]
impl Sleep for TokioSleep {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Aggregate outcome of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Process every target in configured order, one at a time.
///
/// A failed target is logged with its name and URL and counted, never
/// propagated. The configured delay is awaited between consecutive targets
/// but not after the last one.
pub async fn run_targets(
    config: &Config,
    fetcher: &Fetcher,
    options: &ProcessOptions,
    delay: Duration,
    sleep: &dyn Sleep,
    logger: &Logger,
) -> RunSummary {
    let total = config.targets.len();
    let mut summary = RunSummary::default();

    for (index, target) in config.targets.iter().enumerate() {
        logger.info(&format!("Processing target {}/{}", index + 1, total));
        summary.processed += 1;

        if let Err(error) = process_target(target, fetcher, options, logger).await {
            summary.failed += 1;
            logger.error(&format!(
                "Failed to process target {} ({}): {}",
                target.name, target.url, error
            ));
        }

        if !delay.is_zero() && index + 1 < total {
            logger.info(&format!(
                "Waiting {}s before next target",
                delay.as_secs()
            ));
            sleep.sleep(delay).await;
        }
    }

    summary
}
