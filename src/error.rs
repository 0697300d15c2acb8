//! # Error Taxonomy
//!
//! Every fallible operation in the crate reports one of the variants below.
//! Errors are surfaced synchronously to the immediate caller; there are no
//! internal retries (file mapping is attempted exactly once per `open`).
//!
//! Note that malformed slice bounds are *not* errors: they degrade to an
//! empty range in [`crate::slice::normalize_bounds`]. Only single-element
//! access (`byte_at`) performs bounds checking.

use std::path::PathBuf;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Single-element access outside `[0, length)` after negative-index
    /// adjustment.
    #[error("index {index} out of range for view of length {length}")]
    IndexOutOfRange { index: isize, length: usize },

    /// A slice with a step other than 1 was requested; only contiguous
    /// slices are representable as views.
    #[error("slice step {0} is not supported, only contiguous slices are")]
    UnsupportedStep(isize),

    /// The path could not be opened because it does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The file was found but opening it or reading its size failed.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS mapping call itself failed.
    #[error("failed to memory-map '{path}': {source}")]
    MapFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mapped file was used after `close()`. Unreachable through a live
    /// ownership edge, but guarded regardless.
    #[error("mapped file used after close")]
    InvalidState,
}
