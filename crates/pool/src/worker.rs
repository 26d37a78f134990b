//! [`WorkerPool`] — fixed-capacity task submission with two-phase shutdown.
//!
//! Every submission is spawned onto the Tokio runtime immediately but waits
//! for one of `workers` semaphore permits before running, so at most
//! `workers` jobs execute at once and the rest queue. Shutdown first stops
//! accepting work and waits for queued and running jobs to finish, then
//! aborts whatever is left once the timeout elapses.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use cronplan_core::config::PoolConfig;
use tokio::sync::{Notify, Semaphore};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::error::{PoolError, Result};

// ── Shared state ─────────────────────────────────────────────────────

#[derive(Default)]
struct Registry {
    closed: bool,
    tasks: Vec<AbortHandle>,
}

#[derive(Default)]
struct PoolState {
    registry: Mutex<Registry>,
    in_flight: AtomicUsize,
    idle: Notify,
}

impl PoolState {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        // Nothing panics while the lock is held, but a poisoned registry is
        // still structurally sound.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            if self.in_flight.load(Ordering::SeqCst) == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Counts a submission as in flight until its future is dropped, whether it
/// completed, failed, panicked or was aborted.
struct InFlight(Arc<PoolState>);

impl InFlight {
    fn enter(state: Arc<PoolState>) -> Self {
        state.in_flight.fetch_add(1, Ordering::SeqCst);
        Self(state)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

// ── TaskHandle ───────────────────────────────────────────────────────

/// Handle to one submitted job. Await it for the job's result.
///
/// Panics and cancellations surface as [`PoolError::Panicked`] and
/// [`PoolError::Cancelled`] on this handle only.
#[derive(Debug)]
pub struct TaskHandle<T> {
    id: u64,
    inner: JoinHandle<Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Submission sequence number, unique within its pool.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cancel this job. Awaiting the handle afterwards yields `Cancelled`
    /// unless the job had already finished.
    pub fn abort(&self) {
        self.inner.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.inner).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) if e.is_cancelled() => Poll::Ready(Err(PoolError::Cancelled)),
            Poll::Ready(Err(e)) => Poll::Ready(Err(PoolError::Panicked(e.to_string()))),
        }
    }
}

// ── WorkerPool ───────────────────────────────────────────────────────

/// How a call to [`WorkerPool::shutdown`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All queued and running work finished within the timeout.
    Drained,
    /// The timeout elapsed; this many unfinished jobs were aborted.
    Forced { cancelled: usize },
    /// An earlier call already shut the pool down.
    AlreadyShutDown,
}

/// Fixed-capacity pool of async workers. Must be used from within a Tokio
/// runtime.
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    state: Arc<PoolState>,
    workers: usize,
    shutdown_timeout: Duration,
    next_id: AtomicU64,
}

impl WorkerPool {
    pub fn new(config: &PoolConfig) -> Self {
        let workers = config.workers.max(1);
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            state: Arc::new(PoolState::default()),
            workers,
            shutdown_timeout: config.shutdown_timeout,
            next_id: AtomicU64::new(0),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Jobs submitted and not yet finished (queued or running).
    pub fn in_flight(&self) -> usize {
        self.state.in_flight.load(Ordering::SeqCst)
    }

    pub fn is_shut_down(&self) -> bool {
        self.state.registry().closed
    }

    /// Queue a job. Fails with [`PoolError::ShutDown`] once shutdown started.
    pub fn submit<F, T>(&self, job: F) -> Result<TaskHandle<T>>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let mut registry = self.state.registry();
        if registry.closed {
            return Err(PoolError::ShutDown);
        }
        registry.tasks.retain(|task| !task.is_finished());

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let guard = InFlight::enter(self.state.clone());
        let permits = self.permits.clone();
        let inner = tokio::spawn(async move {
            let _guard = guard;
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| PoolError::ShutDown)?;
            job.await
        });
        registry.tasks.push(inner.abort_handle());
        debug!(task_id = id, "job submitted");

        Ok(TaskHandle { id, inner })
    }

    /// Stop accepting work, wait up to the configured timeout for in-flight
    /// jobs, then abort the rest. Safe to call repeatedly and from any task;
    /// only the first call does the work.
    pub async fn shutdown(&self) -> ShutdownOutcome {
        {
            let mut registry = self.state.registry();
            if registry.closed {
                debug!("worker pool already shut down");
                return ShutdownOutcome::AlreadyShutDown;
            }
            registry.closed = true;
        }

        info!(
            pending = self.in_flight(),
            timeout = ?self.shutdown_timeout,
            "draining worker pool"
        );
        match tokio::time::timeout(self.shutdown_timeout, self.state.wait_idle()).await {
            Ok(()) => {
                info!("worker pool drained");
                ShutdownOutcome::Drained
            }
            Err(_) => {
                let tasks = std::mem::take(&mut self.state.registry().tasks);
                let mut cancelled = 0;
                for task in tasks {
                    if !task.is_finished() {
                        task.abort();
                        cancelled += 1;
                    }
                }
                warn!(cancelled, "worker pool drain timed out, cancelled remaining jobs");
                ShutdownOutcome::Forced { cancelled }
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
