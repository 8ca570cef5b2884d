//! Error types and `Result` alias for the oblivious-operator library.
//!
//! All variants here are plan-time errors (spec §7): they are raised before
//! any secret gate is emitted, from public arguments alone (column indices,
//! relation sizes, bucket-list lengths). Backend I/O failures are wrapped
//! rather than modeled case-by-case, since the secure-arithmetic transport
//! is an external collaborator (spec §1) and this crate has no opinion on
//! its failure modes beyond "propagate, don't retry" (spec §7).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Plan-time and backend errors surfaced by relation operators.
#[derive(Debug, Error)]
pub enum Error {
    /// A column index passed to an operator is out of range for the input relation.
    #[error("column index {index} out of range (relation has {num_cols} columns)")]
    InvalidColumn { index: usize, num_cols: usize },

    /// Two inputs that are required to agree on row count do not.
    #[error("length mismatch: {left_label} has {left} rows, {right_label} has {right} rows")]
    LengthMismatch {
        left_label: &'static str,
        left: usize,
        right_label: &'static str,
        right: usize,
    },

    /// A target column's length does not equal the relation's row count.
    #[error("target column has {target} rows, expected {expected}")]
    TargetLengthMismatch { target: usize, expected: usize },

    /// The two bucket lists given to an index join have different bucket counts.
    #[error("bucket count mismatch: left index has {left} buckets, right index has {right}")]
    BucketCountMismatch { left: usize, right: usize },

    /// A comparator string did not match one of the known operators.
    #[error("unknown comparator {0:?}")]
    UnknownComparator(String),

    /// The secure-arithmetic backend failed (I/O, peer disconnect, ...).
    #[error("secure backend error: {0}")]
    Engine(#[from] Box<dyn std::error::Error + Send + Sync>),
}
