//! [`ParsePool`] — parses cron lines on a [`WorkerPool`].

use std::sync::Arc;

use cronplan_core::config::PoolConfig;
use cronplan_core::{CronParser, ScheduleExpression};
use tracing::error;

use crate::error::{PoolError, Result};
use crate::worker::{ShutdownOutcome, TaskHandle, WorkerPool};

/// Submits raw expressions for parsing and hands back one handle each.
///
/// Every job shares the same parser configuration. A failed parse is logged
/// and reported on its own handle; other submissions are unaffected.
pub struct ParsePool {
    pool: WorkerPool,
    parser: Arc<CronParser>,
}

impl ParsePool {
    pub fn new(config: &PoolConfig, parser: CronParser) -> Self {
        Self {
            pool: WorkerPool::new(config),
            parser: Arc::new(parser),
        }
    }

    pub fn submit_parse(&self, raw: impl Into<String>) -> Result<TaskHandle<ScheduleExpression>> {
        let raw = raw.into();
        let parser = self.parser.clone();
        self.pool.submit(async move {
            parser.parse(&raw).map_err(|e| {
                error!(expression = %raw, error = %e, "failed to parse cron expression");
                PoolError::from(e)
            })
        })
    }

    pub async fn shutdown(&self) -> ShutdownOutcome {
        self.pool.shutdown().await
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn is_shut_down(&self) -> bool {
        self.pool.is_shut_down()
    }
}
