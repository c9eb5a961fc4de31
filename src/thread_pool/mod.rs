use std::sync::Arc;

use log::{debug, info, warn};

use crate::{PoolError, Result};

mod handle;
mod queue;
mod worker;

pub use self::handle::ResultHandle;

use self::queue::JobQueue;
use self::worker::Worker;

const DEFAULT_NAME: &str = "pool-worker";

/// Configuration for a [`ThreadPool`].
///
/// ```
/// # use workpool::ThreadPool;
/// let pool = ThreadPool::builder().size(2).name("io").build().unwrap();
/// assert_eq!(pool.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    size: Option<usize>,
    name: Option<String>,
    stack_size: Option<usize>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Builder {
            size: None,
            name: None,
            stack_size: None,
        }
    }

    /// Sets the number of worker threads.
    ///
    /// Defaults to the number of logical CPUs.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the prefix used to name worker threads (`<prefix>-<id>`).
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the stack size, in bytes, of each worker thread.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Starts the pool.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` for a size of zero, `InvalidName` if the name
    /// contains a null byte, or `Io` if a worker thread cannot be created. In the latter case any workers already started
    /// are stopped before returning.
    pub fn build(self) -> Result<ThreadPool> {
        let size = self.size.unwrap_or_else(num_cpus::get);
        if size == 0 {
            return Err(PoolError::InvalidSize);
        }
        let name = self.name.as_deref().unwrap_or(DEFAULT_NAME);
        if name.as_bytes().contains(&0) {
            return Err(PoolError::InvalidName);
        }

        let queue = Arc::new(JobQueue::new());
        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            match Worker::spawn(id, Arc::clone(&queue), name, self.stack_size) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    queue.signal_shutdown();
                    workers.into_iter().for_each(Worker::join);
                    return Err(e);
                }
            }
        }

        info!("Started thread pool '{}' with {} workers", name, size);
        Ok(ThreadPool { queue, workers })
    }
}

/// A fixed-size pool of worker threads sharing one FIFO job queue.
///
/// Dropping the pool stops it: no further jobs are accepted, every job
/// already queued is run, and the calling thread blocks until all
/// workers have exited.
pub struct ThreadPool {
    queue: Arc<JobQueue>,
    workers: Vec<Worker>,
}

impl ThreadPool {
    /// Creates a pool with the given number of threads.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is zero or a thread cannot be spawned.
    pub fn new(threads: usize) -> Result<Self> {
        Builder::new().size(threads).build()
    }

    /// Returns a builder for a customized pool.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Submits a job and returns a handle to its result.
    ///
    /// The call never blocks. A panic inside `job` is captured and
    /// reported by [`ResultHandle::get`].
    ///
    /// ```
    /// # use workpool::ThreadPool;
    /// let pool = ThreadPool::new(2).unwrap();
    /// let x = 21;
    /// let handle = pool.submit(move || x * 2).unwrap();
    /// assert_eq!(handle.get().unwrap(), 42);
    /// ```
    pub fn submit<F, T>(&self, job: F) -> Result<ResultHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        submit(&self.queue, job)
    }

    /// Queues a job whose result is not needed.
    pub fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        spawn(&self.queue, job)
    }

    /// Returns a submission endpoint that can be shared across threads.
    pub fn spawner(&self) -> Spawner {
        Spawner {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Number of jobs waiting for a free worker.
    pub fn pending_jobs(&self) -> usize {
        self.queue.pending()
    }

    /// Stops the pool, blocking until every queued job has run.
    ///
    /// Equivalent to dropping the pool.
    pub fn shutdown(self) {
        drop(self);
    }

    fn terminate(&mut self) {
        self.queue.signal_shutdown();
        let count = self.workers.len();
        for worker in self.workers.drain(..) {
            // A job dropping its own pool cannot join the thread it runs on;
            // that worker exits by itself once the queue is drained.
            if worker.is_current() {
                debug!("Pool dropped from its own worker, leaving it to exit");
                continue;
            }
            worker.join();
        }
        info!("Thread pool stopped, {} workers joined", count);
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// A cloneable handle for submitting jobs to a [`ThreadPool`].
///
/// A spawner does not keep the pool alive. Once the pool has begun
/// shutting down, every submission through it fails with `PoolStopped`.
#[derive(Clone)]
pub struct Spawner {
    queue: Arc<JobQueue>,
}

impl Spawner {
    /// Submits a job and returns a handle to its result.
    pub fn submit<F, T>(&self, job: F) -> Result<ResultHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        submit(&self.queue, job)
    }

    /// Queues a job whose result is not needed.
    pub fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        spawn(&self.queue, job)
    }

    /// Returns `true` once the pool has stopped accepting jobs.
    pub fn is_stopped(&self) -> bool {
        self.queue.is_shutdown()
    }
}

fn submit<F, T>(queue: &JobQueue, job: F) -> Result<ResultHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    if queue.is_shutdown() {
        warn!("Rejected job submitted after shutdown");
        return Err(PoolError::PoolStopped);
    }
    let (job, result) = handle::bind(job);
    queue
        .push(job)
        .inspect_err(|_| warn!("Rejected job submitted after shutdown"))?;
    Ok(result)
}

fn spawn<F>(queue: &JobQueue, job: F) -> Result<()>
where
    F: FnOnce() + Send + 'static,
{
    queue
        .push(Box::new(job))
        .inspect_err(|_| warn!("Rejected job submitted after shutdown"))
}
