//! Built-in copy-number record types.
//!
//! Each record type comes with a codec and a collection alias:
//! - [`CopyRatio`]: per-interval log2 copy ratio ([`CopyRatioCollection`])
//! - [`CopyRatioSegment`]: segment mean over many copy ratios ([`CopyRatioSegmentCollection`])
//! - [`AllelicCount`]: ref/alt read counts at a site ([`AllelicCountCollection`])
//!
//! # Example
//!
//! ```
//! use biotable::records::{CopyRatio, CopyRatioCodec, CopyRatioCollection};
//! use biotable::GenomicInterval;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let collection = CopyRatioCollection::new(
//!     "tumor",
//!     vec![CopyRatio::new(GenomicInterval::new("chr1", 1, 1000)?, 0.12)],
//!     CopyRatioCodec::default(),
//! )?;
//! assert_eq!(collection.intervals()[0].length(), 1000);
//! # Ok(())
//! # }
//! ```

pub mod allelic_count;
pub mod copy_ratio;
pub mod segment;

pub use allelic_count::{AllelicCount, AllelicCountCodec, AllelicCountCollection, Nucleotide};
pub use copy_ratio::{CopyRatio, CopyRatioCodec, CopyRatioCollection};
pub use segment::{CopyRatioSegment, CopyRatioSegmentCodec, CopyRatioSegmentCollection};

use crate::formats::primitives::{DataLine, GenomicInterval, Result, RowBuilder};

/// Column names shared by the built-in tables.
pub mod columns {
    /// Contig name
    pub const CONTIG: &str = "CONTIG";
    /// Interval start (1-based)
    pub const START: &str = "START";
    /// Interval end (1-based, inclusive)
    pub const END: &str = "END";
    /// Single-base site position (1-based)
    pub const POSITION: &str = "POSITION";
    /// Log2 copy ratio of one interval
    pub const LOG2_COPY_RATIO: &str = "LOG2_COPY_RATIO";
    /// Number of copy ratios in a segment
    pub const NUM_POINTS_COPY_RATIO: &str = "NUM_POINTS_COPY_RATIO";
    /// Mean log2 copy ratio of a segment
    pub const MEAN_LOG2_COPY_RATIO: &str = "MEAN_LOG2_COPY_RATIO";
    /// Reads supporting the reference allele
    pub const REF_COUNT: &str = "REF_COUNT";
    /// Reads supporting the alternate allele
    pub const ALT_COUNT: &str = "ALT_COUNT";
    /// Reference base
    pub const REF_NUCLEOTIDE: &str = "REF_NUCLEOTIDE";
    /// Alternate base
    pub const ALT_NUCLEOTIDE: &str = "ALT_NUCLEOTIDE";
}

/// Reads `CONTIG`, `START` and `END` into a validated interval.
fn decode_interval(line: &DataLine<'_>) -> Result<GenomicInterval> {
    GenomicInterval::new(
        line.get(columns::CONTIG)?,
        line.parse(columns::START)?,
        line.parse(columns::END)?,
    )
}

fn encode_interval(interval: &GenomicInterval, row: &mut RowBuilder<'_>) {
    row.set(columns::CONTIG, &interval.contig)
        .set(columns::START, interval.start)
        .set(columns::END, interval.end);
}
