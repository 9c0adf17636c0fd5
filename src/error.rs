//! Error types for confusion-matrix construction and metric evaluation.
//!
//! Validation failures are reported through [`Error`] before any computation
//! runs. Structurally-zero divisors are *not* errors: metric functions return
//! `f64::NAN` for those, because a rate over zero trials is a well-defined
//! domain outcome rather than a fault.

use thiserror::Error;

/// Result type alias for evaluar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by matrix builders and metric evaluators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Truth and estimate sequences have different lengths.
    #[error("length mismatch: truth has {truth} observations, estimate has {estimate}")]
    LengthMismatch { truth: usize, estimate: usize },

    /// No observation pairs remain after missing-value handling.
    #[error("no observations remain after dropping missing pairs")]
    EmptyData,

    /// A missing value was encountered under `NaPolicy::Fail`.
    #[error("missing value in observation pair {index} (policy is NaPolicy::Fail)")]
    MissingValue { index: usize },

    /// The level alphabet has fewer than two distinct levels.
    #[error("level alphabet must contain at least two levels, got {0}")]
    TooFewLevels(usize),

    /// The level alphabet contains the same level twice.
    #[error("duplicate level {level} in alphabet")]
    DuplicateLevel { level: String },

    /// An observed label is not part of the declared level alphabet.
    #[error("label {label} at observation {index} is not in the declared level set")]
    UnknownLabel { label: String, index: usize },

    /// A level passed as positive/negative is not among the matrix levels.
    #[error("level {level} is not among the matrix levels")]
    UnknownLevel { level: String },

    /// A caller-supplied count table is not square or disagrees with its levels.
    #[error("count table must be {expected}x{expected} to match its levels, got {rows} rows with widths {widths:?}")]
    MalformedTable { expected: usize, rows: usize, widths: Vec<usize> },

    /// A binary-only metric was asked of a matrix that is not 2x2.
    #[error("binary metrics require a 2x2 matrix, got {0}x{0}")]
    NotBinary(usize),

    /// An explicit prevalence override falls outside the open interval (0, 1).
    #[error("prevalence must lie in (0, 1), got {0}")]
    InvalidPrevalence(f64),

    /// A named column does not exist in the frame.
    #[error("column '{name}' not found in frame")]
    ColumnNotFound { name: String },

    /// A column being added disagrees with the frame's row count.
    #[error("column '{name}' has {len} rows, frame has {expected}")]
    ColumnLengthMismatch { name: String, len: usize, expected: usize },
}
