//! File access for table loading and storing.
//!
//! - [`CompressedReader`]: buffered input with gzip auto-detection
//! - [`CompressedWriter`]: buffered output with optional gzip compression

pub mod compression;

pub use compression::{has_gzip_extension, CompressedReader, CompressedWriter};
