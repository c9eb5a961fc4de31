use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::{PoolError, Result};

/// A type-erased unit of work.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Pending jobs and the shutdown flag, always accessed under one lock.
struct State {
    jobs: VecDeque<Job>,
    shutdown: bool,
}

/// An unbounded FIFO of jobs shared by all workers and submitters.
///
/// Workers block on the condition variable until a job arrives or
/// shutdown is signalled. Once shutdown is signalled, workers keep
/// draining until the queue is empty.
pub(crate) struct JobQueue {
    state: Mutex<State>,
    available: Condvar,
}

impl JobQueue {
    pub(crate) fn new() -> Self {
        JobQueue {
            state: Mutex::new(State {
                jobs: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends a job to the tail of the queue and wakes one worker.
    ///
    /// Fails with `PoolStopped` if shutdown has been signalled; the job
    /// is dropped without running.
    pub(crate) fn push(&self, job: Job) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            if state.shutdown {
                return Err(PoolError::PoolStopped);
            }
            state.jobs.push_back(job);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Removes the head job, blocking while the queue is empty.
    ///
    /// Returns `None` only when shutdown is set and nothing is left to run.
    pub(crate) fn pop_or_wait(&self) -> Option<Job> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.shutdown {
                return None;
            }
            state = self.available.wait(state).unwrap();
        }
    }

    /// Sets the shutdown flag and wakes every waiting worker.
    pub(crate) fn signal_shutdown(&self) {
        self.state.lock().unwrap().shutdown = true;
        self.available.notify_all();
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.state.lock().unwrap().shutdown
    }

    /// Number of jobs queued but not yet taken by a worker.
    pub(crate) fn pending(&self) -> usize {
        self.state.lock().unwrap().jobs.len()
    }
}
