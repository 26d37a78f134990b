//! Bounded worker pool for parsing many cron expressions concurrently.
//!
//! [`WorkerPool`] runs submitted futures with at most `workers` in flight and
//! hands back one [`TaskHandle`] per submission. A failure, panic or
//! cancellation resolves only its own handle. [`ParsePool`] specializes the
//! pool for cron lines.

pub mod error;
pub mod parse;
pub mod worker;

pub use error::{PoolError, Result};
pub use parse::ParsePool;
pub use worker::{ShutdownOutcome, TaskHandle, WorkerPool};
