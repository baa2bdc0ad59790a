//! Genomic coordinate types.
//!
//! This module provides:
//! - [`GenomicInterval`]: A genomic interval (contig, start, end)
//! - [`Locatable`]: The capability every table record exposes
//!
//! # Coordinate System
//!
//! All intervals use **1-based, closed** coordinates `[start, end]`:
//! - Start position is inclusive and at least 1
//! - End position is inclusive and at least `start`
//! - Length = end - start + 1
//!
//! A single-base site such as an allelic count has `start == end`.
//!
//! # Examples
//!
//! ```
//! use biotable::formats::primitives::GenomicInterval;
//!
//! let interval = GenomicInterval::new("chr1", 100, 200)?;
//!
//! assert_eq!(interval.contig, "chr1");
//! assert_eq!(interval.length(), 101);
//! assert_eq!(interval.to_string(), "chr1:100-200");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::formats::primitives::{FormatError, Result, COMMENT_PREFIX};
use std::fmt;

/// A genomic interval with contig and coordinates.
///
/// # Invariants
///
/// - Contig name is non-empty, does not start with `#`, and holds no tab or
///   line break
/// - `1 <= start <= end` (enforced by constructor)
///
/// The fields are public, so code that builds or edits an interval directly
/// bypasses these checks; the table writer rejects such values on store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenomicInterval {
    /// Contig (chromosome) name.
    pub contig: String,

    /// Start position (1-based, inclusive).
    pub start: u64,

    /// End position (1-based, inclusive).
    pub end: u64,
}

impl GenomicInterval {
    /// Creates a new genomic interval.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidContig`] if the contig could not be read
    /// back from a data line (empty, leading `#`, tab or line break), and
    /// [`FormatError::InvalidInterval`] if `start` is 0 or `start > end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use biotable::formats::primitives::GenomicInterval;
    ///
    /// assert!(GenomicInterval::new("chr1", 100, 100).is_ok());
    /// assert!(GenomicInterval::new("chr1", 200, 100).is_err());
    /// assert!(GenomicInterval::new("chr1", 0, 100).is_err());
    /// assert!(GenomicInterval::new("#chrUn", 1, 100).is_err());
    /// ```
    pub fn new(contig: impl Into<String>, start: u64, end: u64) -> Result<Self> {
        let contig = contig.into();
        if !is_valid_contig(&contig) {
            return Err(FormatError::InvalidContig(contig));
        }
        if start == 0 || start > end {
            return Err(FormatError::InvalidInterval { contig, start, end });
        }

        Ok(GenomicInterval { contig, start, end })
    }

    /// Returns the number of bases covered.
    #[inline]
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Checks if this interval shares at least one base with another.
    ///
    /// Different contigs never overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contig == other.contig && self.start <= other.end && other.start <= self.end
    }

    /// Checks if this interval completely contains another.
    pub fn contains(&self, other: &Self) -> bool {
        self.contig == other.contig && self.start <= other.start && self.end >= other.end
    }
}

/// A contig must be non-empty and must not start a comment or split a line.
fn is_valid_contig(contig: &str) -> bool {
    !contig.is_empty()
        && !contig.starts_with(COMMENT_PREFIX)
        && !contig.contains(['\t', '\n', '\r'])
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}

/// A value that sits on the genome.
///
/// Table records only need to expose their coordinates; everything else about
/// them is up to the record type.
pub trait Locatable {
    /// Contig name.
    fn contig(&self) -> &str;

    /// Start position (1-based, inclusive).
    fn start(&self) -> u64;

    /// End position (1-based, inclusive).
    fn end(&self) -> u64;

    /// Copies the coordinates into a new, independently owned interval.
    fn to_interval(&self) -> GenomicInterval {
        GenomicInterval {
            contig: self.contig().to_string(),
            start: self.start(),
            end: self.end(),
        }
    }
}

impl Locatable for GenomicInterval {
    fn contig(&self) -> &str {
        &self.contig
    }

    fn start(&self) -> u64 {
        self.start
    }

    fn end(&self) -> u64 {
        self.end
    }
}
