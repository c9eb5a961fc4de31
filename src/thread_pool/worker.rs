use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error};

use super::queue::JobQueue;
use crate::Result;

/// A single pool thread draining the shared job queue.
pub(crate) struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Starts a worker thread that runs jobs until the queue reports
    /// shutdown with nothing left to drain.
    pub(crate) fn spawn(
        id: usize,
        queue: Arc<JobQueue>,
        name_prefix: &str,
        stack_size: Option<usize>,
    ) -> Result<Worker> {
        let mut builder = thread::Builder::new().name(format!("{name_prefix}-{id}"));
        if let Some(size) = stack_size {
            builder = builder.stack_size(size);
        }
        let handle = builder.spawn(move || run(id, &queue))?;
        Ok(Worker { id, handle })
    }

    /// Returns `true` when called from this worker's own thread.
    pub(crate) fn is_current(&self) -> bool {
        self.handle.thread().id() == thread::current().id()
    }

    /// Blocks until the worker thread has terminated.
    pub(crate) fn join(self) {
        if self.handle.join().is_err() {
            error!("Worker {} terminated abnormally", self.id);
        }
    }
}

fn run(id: usize, queue: &JobQueue) {
    debug!("Worker {id} started");
    while let Some(job) = queue.pop_or_wait() {
        debug!("Worker {id} executing job");
        // Jobs built by `submit` capture their own panics; this only
        // catches bare `spawn` jobs.
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            error!("Worker {id} job panicked, continuing");
        }
    }
    debug!("Worker {id}: queue drained, shutting down");
}
