//! Error types for index construction and record fetching.
//!
//! Failures during a refresh are contained within the source: they are
//! recorded for diagnostics and retried, and never reach the read path.

use thiserror::Error;

/// A provider-originated fetch failure.
///
/// Opaque to the core: whatever went wrong acquiring records (network,
/// cache I/O, upstream format) is carried unchanged as the cause.
#[derive(Error, Debug)]
#[error("record fetch failed: {0}")]
pub struct FetchError(#[from] anyhow::Error);

impl FetchError {
    /// Wrap any error as an opaque fetch failure.
    pub fn new(cause: impl Into<anyhow::Error>) -> Self {
        Self(cause.into())
    }
}

/// Errors from a single index build attempt.
///
/// A failed build is fatal to that one attempt only: the source keeps
/// serving the previously published snapshot (if any) and retries on the
/// next cycle.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The record provider failed; the fetch failure is the cause.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A record violated a structural invariant of the snapshot,
    /// e.g. a duplicate normalized symbol key.
    #[error("invalid record at position {position}: {reason}")]
    InvalidRecord {
        /// Position of the offending record in the build input.
        position: usize,
        /// Description of the violation.
        reason: String,
    },
}
