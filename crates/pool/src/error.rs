//! Pool error types.

use cronplan_core::CronError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool is shut down")]
    ShutDown,

    #[error(transparent)]
    Parse(#[from] CronError),

    #[error("task was cancelled")]
    Cancelled,

    #[error("task panicked: {0}")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;
