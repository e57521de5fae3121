//! Worker pool with an explicit lifecycle and future-like task handles.
//!
//! The pool is created once, accepts any number of jobs, and is released by
//! [`ParallelExecutor::close`]. Work already dispatched runs to completion;
//! every later submission fails with [`FftError::EngineClosed`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::RwLock;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio::sync::oneshot;
use tracing::{error, info};

use crate::error::{FftError, Result};

/// Fixed-size rayon pool behind an explicit shutdown switch.
#[derive(Debug)]
pub struct ParallelExecutor {
    pool: RwLock<Option<Arc<ThreadPool>>>,
    threads: usize,
}

impl ParallelExecutor {
    /// Start a pool with `threads` workers (`0` = one per available core).
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("zkfft-worker-{i}"))
            .panic_handler(|_| error!("transform task panicked"))
            .build()
            .map_err(|e| FftError::PoolStartup(e.to_string()))?;
        let threads = pool.current_num_threads();
        info!(threads, "worker pool started");
        Ok(Self {
            pool: RwLock::new(Some(Arc::new(pool))),
            threads,
        })
    }

    /// Number of worker threads the pool was started with.
    #[must_use]
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Whether [`ParallelExecutor::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.pool.read().is_none()
    }

    fn pool(&self) -> Result<Arc<ThreadPool>> {
        self.pool.read().clone().ok_or(FftError::EngineClosed)
    }

    /// Run `op` inside the pool and block until it returns.
    pub fn install<R, OP>(&self, op: OP) -> Result<R>
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        let pool = self.pool()?;
        Ok(pool.install(op))
    }

    /// Submit `job` and return a handle to its result.
    pub fn spawn<T, J>(&self, job: J) -> Result<TaskHandle<T>>
    where
        T: Send + 'static,
        J: FnOnce() -> Result<T> + Send + 'static,
    {
        let pool = self.pool()?;
        let (tx, rx) = oneshot::channel();
        pool.spawn(move || {
            // The receiver may have been dropped; the result is then discarded.
            let _ = tx.send(job());
        });
        Ok(TaskHandle { rx })
    }

    /// Release the pool. Idempotent; returns `true` on the call that closed it.
    pub fn close(&self) -> bool {
        let released = self.pool.write().take().is_some();
        if released {
            info!("worker pool shut down");
        }
        released
    }
}

/// Result of a submitted job.
///
/// Await it from async code, or call [`TaskHandle::join`] from a plain
/// thread (not from inside an async runtime).
#[derive(Debug)]
#[must_use = "a task handle does nothing unless joined or awaited"]
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Block the current thread until the job finishes.
    pub fn join(self) -> Result<T> {
        self.rx.blocking_recv().map_err(|_| FftError::TaskAborted)?
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(res)) => Poll::Ready(res),
            Poll::Ready(Err(_)) => Poll::Ready(Err(FftError::TaskAborted)),
            Poll::Pending => Poll::Pending,
        }
    }
}
