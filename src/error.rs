use std::io;
use thiserror::Error;

/// Error type for thread pool operations.
#[derive(Error, Debug)]
pub enum PoolError {
    /// The pool has begun shutting down and accepts no more jobs.
    #[error("thread pool is stopped")]
    PoolStopped,

    /// A pool was requested with zero worker threads.
    #[error("thread pool size must be greater than zero")]
    InvalidSize,

    /// The thread name prefix contains a null byte.
    #[error("thread pool name must not contain null bytes")]
    InvalidName,

    /// A worker thread could not be created.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The submitted job panicked; carries the panic message.
    #[error("job panicked: {0}")]
    JobPanicked(String),

    /// The job was dropped before it produced a result.
    #[error("job result was lost")]
    ResultLost,

    /// Waiting on a result handle timed out.
    #[error("timed out waiting for job result")]
    Timeout,
}

/// Result type alias for thread pool operations.
pub type Result<T> = std::result::Result<T, PoolError>;
