use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use super::queue::Job;
use crate::{PoolError, Result};

type Outcome<T> = std::result::Result<T, String>;

/// A one-shot handle to the eventual result of a submitted job.
///
/// The handle is consumed by reading it, so a result can be retrieved
/// only once. Dropping the handle does not cancel the job.
pub struct ResultHandle<T> {
    rx: Receiver<Outcome<T>>,
    // Dead once the job has run or been dropped.
    job_alive: Weak<()>,
}

impl<T> ResultHandle<T> {
    /// Blocks until the job has finished and returns its value.
    ///
    /// # Errors
    ///
    /// Returns `JobPanicked` if the job panicked, or `ResultLost` if the
    /// job was dropped without running.
    pub fn get(self) -> Result<T> {
        match self.rx.recv() {
            Ok(outcome) => outcome.map_err(PoolError::JobPanicked),
            Err(_) => Err(PoolError::ResultLost),
        }
    }

    /// Like [`get`](ResultHandle::get), but gives up after `timeout`.
    ///
    /// The job itself keeps running when the wait times out.
    pub fn get_timeout(self, timeout: Duration) -> Result<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => outcome.map_err(PoolError::JobPanicked),
            Err(RecvTimeoutError::Timeout) => Err(PoolError::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(PoolError::ResultLost),
        }
    }

    /// Returns `true` once [`get`](ResultHandle::get) would return without
    /// blocking, either with the outcome or with `ResultLost`.
    pub fn is_ready(&self) -> bool {
        !self.rx.is_empty() || self.job_alive.strong_count() == 0
    }
}

impl<T> fmt::Debug for ResultHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandle")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Wraps `f` into a job that delivers its outcome to the returned handle.
pub(crate) fn bind<F, T>(f: F) -> (Job, ResultHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = channel::bounded(1);
    let token = Arc::new(());
    let job_alive = Arc::downgrade(&token);
    let job: Job = Box::new(move || {
        deliver(&tx, f);
        drop(token);
    });
    (job, ResultHandle { rx, job_alive })
}

fn deliver<F, T>(tx: &Sender<Outcome<T>>, f: F)
where
    F: FnOnce() -> T,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message);
    // The caller may have dropped the handle; the outcome is discarded then.
    let _ = tx.send(outcome);
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn delivers_value() {
        let (job, handle) = bind(|| 21 * 2);
        assert!(!handle.is_ready());
        job();
        assert!(handle.is_ready());
        assert_eq!(handle.get().unwrap(), 42);
    }

    #[test]
    fn captures_panic_message() {
        let (job, handle) = bind(|| -> u32 {
            panic_control::disable_hook_in_current_thread();
            panic!("boom {}", 7)
        });
        job();
        match handle.get() {
            Err(PoolError::JobPanicked(msg)) => assert_eq!(msg, "boom 7"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn dropped_job_reports_lost_result() {
        let (job, handle) = bind(|| 1);
        assert!(!handle.is_ready());
        drop(job);
        assert!(handle.is_ready());
        assert!(matches!(handle.get(), Err(PoolError::ResultLost)));
    }

    #[test]
    fn get_blocks_until_job_runs_elsewhere() {
        let (job, handle) = bind(|| "done".to_owned());
        let runner = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            job();
        });
        assert_eq!(handle.get().unwrap(), "done");
        runner.join().unwrap();
    }

    #[test]
    fn get_timeout_expires_while_pending() {
        let (_job, handle) = bind(|| 1);
        assert!(matches!(
            handle.get_timeout(Duration::from_millis(10)),
            Err(PoolError::Timeout)
        ));
    }
}
