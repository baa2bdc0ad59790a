//! Shared primitives for sample-tagged tab-delimited tables.
//!
//! This module provides the reusable infrastructure every table is built from:
//! - Column sets and the mandatory-column check ([`TableColumns`])
//! - Field parsing utilities
//! - Genomic types ([`GenomicInterval`], [`Locatable`])
//! - Header/comment handling ([`TableHeader`])
//! - Line-level reading and writing ([`TableReader`], [`TableWriter`])
//!
//! # Example: Reading a Table
//!
//! ```
//! use biotable::formats::primitives::{TableReader, Result};
//!
//! let data = "#SAMPLE_NAME=S1\nCONTIG\tSTART\tEND\nchr1\t100\t200\n";
//! let mut reader = TableReader::new(data.as_bytes())?;
//! assert_eq!(reader.header().sample_name()?, Some("S1"));
//!
//! let contigs: Vec<String> = reader
//!     .records(|line| Ok(line.get("CONTIG")?.to_string()))
//!     .collect::<Result<_>>()?;
//! assert_eq!(contigs, vec!["chr1"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use thiserror::Error;

pub mod columns;
pub mod fields;
pub mod genomic;
pub mod header;
pub mod tab_delimited;

// Re-exports
pub use columns::TableColumns;
pub use genomic::{GenomicInterval, Locatable};
pub use header::{TableHeader, COMMENT_PREFIX, SAMPLE_NAME_TAG};
pub use tab_delimited::{DataLine, Records, RowBuilder, TableReader, TableWriter};

/// Errors that can occur when parsing or writing tab-delimited tables.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid number of tab-delimited fields.
    #[error("Invalid number of fields: expected {expected}, got {actual} at line {line}")]
    FieldCount {
        /// Expected number of fields
        expected: usize,
        /// Actual number of fields found
        actual: usize,
        /// Line number where error occurred
        line: usize,
    },

    /// Invalid field value.
    #[error("Invalid field '{field}' at line {line}: {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// Line number where error occurred
        line: usize,
        /// Reason for invalidity
        reason: String,
    },

    /// A record asked for a column the header does not declare.
    #[error("Column '{column}' not present at line {line}")]
    MissingColumn {
        /// Column name
        column: String,
        /// Line number where error occurred
        line: usize,
    },

    /// Mandatory columns absent from a header.
    #[error("Missing mandatory columns: {}", .missing.join(", "))]
    MissingColumns {
        /// Missing column names, in declared order
        missing: Vec<String>,
    },

    /// A header declares the same column more than once.
    #[error("Duplicate column '{0}' in header")]
    DuplicateColumn(String),

    /// The input ended before a header line was found.
    #[error("No header line found")]
    MissingHeader,

    /// Malformed header or metadata comment.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid genomic interval.
    #[error("Invalid genomic interval {contig}:{start}-{end} (requires 1 <= start <= end)")]
    InvalidInterval {
        /// Contig name
        contig: String,
        /// Start position
        start: u64,
        /// End position
        end: u64,
    },

    /// Contig name that cannot be carried in a data line.
    #[error("Invalid contig {0:?}: must be non-empty with no leading '#', tab or line break")]
    InvalidContig(String),

    /// Comment text that would not survive a round trip.
    #[error("Invalid comment: {0:?}")]
    InvalidComment(String),

    /// A row value that would not read back as written.
    #[error("Cannot write column '{column}': {reason}")]
    UnwritableValue {
        /// Column holding the value
        column: String,
        /// Why the value cannot be written
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;
