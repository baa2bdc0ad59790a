//! Load and store options.
//!
//! The on-disk layout itself is fixed: comments start with
//! [`COMMENT_PREFIX`](crate::formats::primitives::COMMENT_PREFIX) and the sample
//! comment with [`SAMPLE_NAME_TAG`](crate::formats::primitives::SAMPLE_NAME_TAG).
//! What callers can choose is collected in [`TsvOptions`].
//!
//! # Example
//!
//! ```
//! use biotable::{Compression, SampleNamePolicy, TsvOptions};
//!
//! let options = TsvOptions::new()
//!     .with_sample_name_policy(SampleNamePolicy::Fallback("unknown".to_string()))
//!     .with_compression(Compression::Gzip);
//!
//! assert_eq!(options.compression, Compression::Gzip);
//! ```

use crate::io::has_gzip_extension;
use std::path::Path;

/// What to do when an input has no `#SAMPLE_NAME=` comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SampleNamePolicy {
    /// Fail the load with a bad-input error.
    #[default]
    Required,
    /// Use the given name instead.
    Fallback(String),
}

/// Output compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Gzip when the path ends in `.gz`, `.bgz` or `.gzip`.
    #[default]
    Auto,
    /// Always write plain text.
    None,
    /// Always gzip.
    Gzip,
}

impl Compression {
    /// Whether output to `path` is compressed under this setting.
    pub fn applies_to(&self, path: &Path) -> bool {
        match self {
            Compression::Auto => has_gzip_extension(path),
            Compression::None => false,
            Compression::Gzip => true,
        }
    }
}

/// Options for loading and storing collections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsvOptions {
    /// Handling of inputs without a sample-name comment.
    pub sample_name_policy: SampleNamePolicy,
    /// Output compression.
    pub compression: Compression,
}

impl TsvOptions {
    /// Default options: sample name required, compression by extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the missing-sample-name policy.
    pub fn with_sample_name_policy(mut self, policy: SampleNamePolicy) -> Self {
        self.sample_name_policy = policy;
        self
    }

    /// Sets the output compression.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}
