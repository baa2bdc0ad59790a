//! Error types for biotable

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for biotable operations
pub type Result<T> = std::result::Result<T, BiotableError>;

/// Error types that can occur in biotable
///
/// Loads and stores are all-or-nothing: every variant is terminal for the
/// operation that produced it, and no partial collection is ever returned.
#[derive(Debug, Error)]
pub enum BiotableError {
    /// Input path missing or unreadable
    #[error("Could not read input file {}: {source}", .path.display())]
    InputNotReadable {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Mandatory columns absent from the input header
    #[error("Bad input: missing mandatory columns: {}", .missing.join(", "))]
    SchemaViolation {
        /// Missing column names, in declared order
        missing: Vec<String>,
    },

    /// A data line could not be decoded into a record
    #[error("Bad input: TSV file must have all columns specified (line {line}: {reason})")]
    RecordDecodeFailure {
        /// Line number of the offending data line
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Output path could not be created or written
    #[error("Could not create output file {}: {source}", .path.display())]
    OutputNotCreatable {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Malformed header or metadata comment
    #[error("Bad input: {msg}")]
    BadInput {
        /// Error message
        msg: String,
    },

    /// Sample name that is empty or spans lines
    #[error("Invalid sample name: {name:?}")]
    InvalidSampleName {
        /// The rejected name
        name: String,
    },

    /// I/O error on a caller-supplied reader or writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BiotableError {
    /// Create a bad-input error
    pub fn bad_input(msg: impl Into<String>) -> Self {
        Self::BadInput { msg: msg.into() }
    }
}
