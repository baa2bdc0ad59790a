//! Tab-delimited table formats.
//!
//! Every table biotable reads or writes has the same layout:
//! - **Metadata comments**: `#`-prefixed lines, including `#SAMPLE_NAME=<name>`
//! - **Header**: tab-separated column names
//! - **Data lines**: one record per line, fields aligned to the header
//!
//! # Design Principles
//!
//! ## 1. Columns by Name
//!
//! Records read their fields by column name, so files may reorder columns or
//! carry extra ones. Only the mandatory set is checked.
//!
//! ## 2. Fail Before Decoding
//!
//! The header is parsed and validated before the first data line is touched,
//! so a file with the wrong schema fails once, with one error.
//!
//! ## 3. Production Quality
//!
//! - No `panic!` on bad input (all errors use `Result`)
//! - Panics only for codec bugs (a column left unset on write)
//! - Property-based testing for correctness
//!
//! # Module Organization
//!
//! - [`primitives`]: columns, fields, intervals, header, reader and writer

pub mod primitives;

// Re-export commonly used types
pub use primitives::{
    DataLine, FormatError, GenomicInterval, Locatable, RowBuilder, TableColumns, TableHeader,
    TableReader, TableWriter,
};
