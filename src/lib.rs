#![deny(missing_docs)]

//! A fixed-size thread pool that hands back a result handle per job.
//!
//! Jobs are queued in a single FIFO shared by every worker. Each
//! submission returns a [`ResultHandle`] that yields the job's value, or
//! the panic it raised. Dropping the [`ThreadPool`] drains the queue and
//! joins all workers.

mod error;
/// Thread pool, its builder and result handles.
pub mod thread_pool;

pub use error::{PoolError, Result};
pub use thread_pool::{Builder, ResultHandle, Spawner, ThreadPool};
