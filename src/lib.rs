//! biotable: sample-tagged, schema-enforced tab-delimited record collections
//!
//! # Overview
//!
//! biotable stores an ordered sequence of interval-bearing records together with
//! the name of the sample they describe, and moves them losslessly between memory
//! and a tab-delimited text file:
//!
//! ```text
//! #SAMPLE_NAME=S1
//! CONTIG	START	END	LOG2_COPY_RATIO
//! chr1	100	200	1.5
//! chr1	300	400	-0.2
//! ```
//!
//! ## Key Features
//!
//! - **Schema enforcement**: mandatory columns are checked by name before any row is decoded
//! - **Pluggable codecs**: one [`RecordCodec`] per record type maps rows to records and back
//! - **Metadata comment**: the sample name travels as a `#SAMPLE_NAME=` comment, not a column
//! - **All-or-nothing**: a load either yields the whole collection or a typed error
//! - **Compression**: gzip input is detected transparently; `.gz` output is compressed
//!
//! ## Quick Start
//!
//! ```no_run
//! use biotable::records::CopyRatioCollection;
//!
//! # fn main() -> biotable::Result<()> {
//! let collection = CopyRatioCollection::from_path("tumor.cr.tsv", Default::default())?;
//!
//! println!("{}: {} records", collection.sample_name(), collection.len());
//! for interval in collection.intervals() {
//!     println!("{}", interval);
//! }
//!
//! collection.write("tumor.cr.copy.tsv.gz")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`]: the [`TsvCollection`] container and the [`RecordCodec`] trait
//! - [`formats`]: tab-delimited primitives (columns, rows, reader, writer, intervals)
//! - [`records`]: built-in copy-number record types and their codecs
//! - [`io`]: file opening with compression detection
//! - [`config`]: load/store options

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod collection;
pub mod config;
pub mod error;
pub mod formats;
pub mod io;
pub mod records;

// Re-export commonly used types
pub use collection::{FnCodec, RecordCodec, TsvCollection};
pub use config::{Compression, SampleNamePolicy, TsvOptions};
pub use error::{BiotableError, Result};
pub use formats::primitives::{DataLine, GenomicInterval, Locatable, RowBuilder, TableColumns};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
