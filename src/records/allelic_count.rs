//! Ref/alt read counts at heterozygous sites.
//!
//! Allelic-count tables locate each record by a single `POSITION` column rather
//! than `START`/`END`; the record's interval is that one base.

use super::columns;
use crate::collection::{RecordCodec, TsvCollection};
use crate::formats::primitives::{
    DataLine, GenomicInterval, Locatable, Result, RowBuilder, TableColumns,
};
use std::fmt;
use std::str::FromStr;

/// A reference or alternate base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    /// Adenine
    A,
    /// Cytosine
    C,
    /// Guanine
    G,
    /// Thymine
    T,
    /// Unknown base
    N,
}

impl FromStr for Nucleotide {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "A" | "a" => Ok(Nucleotide::A),
            "C" | "c" => Ok(Nucleotide::C),
            "G" | "g" => Ok(Nucleotide::G),
            "T" | "t" => Ok(Nucleotide::T),
            "N" | "n" => Ok(Nucleotide::N),
            _ => Err("expected one of A, C, G, T, N".to_string()),
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self {
            Nucleotide::A => "A",
            Nucleotide::C => "C",
            Nucleotide::G => "G",
            Nucleotide::T => "T",
            Nucleotide::N => "N",
        };
        f.write_str(base)
    }
}

/// Read counts supporting each allele at one site.
///
/// The site is a single base: its interval always has `start == end`, which is
/// why the interval is only reachable through [`AllelicCount::new`] and read
/// through [`AllelicCount::interval`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AllelicCount {
    interval: GenomicInterval,
    /// Reads supporting the reference allele
    pub ref_count: u32,
    /// Reads supporting the alternate allele
    pub alt_count: u32,
    /// Reference base
    pub ref_nucleotide: Nucleotide,
    /// Alternate base
    pub alt_nucleotide: Nucleotide,
}

impl AllelicCount {
    /// Create a count at `contig:position`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidContig`] for a contig that cannot be stored
    /// and [`FormatError::InvalidInterval`] for position 0.
    ///
    /// [`FormatError::InvalidContig`]: crate::formats::primitives::FormatError::InvalidContig
    /// [`FormatError::InvalidInterval`]: crate::formats::primitives::FormatError::InvalidInterval
    pub fn new(
        contig: impl Into<String>,
        position: u64,
        ref_count: u32,
        alt_count: u32,
        ref_nucleotide: Nucleotide,
        alt_nucleotide: Nucleotide,
    ) -> Result<Self> {
        Ok(Self {
            interval: GenomicInterval::new(contig, position, position)?,
            ref_count,
            alt_count,
            ref_nucleotide,
            alt_nucleotide,
        })
    }

    /// Single-base interval of the site.
    pub fn interval(&self) -> &GenomicInterval {
        &self.interval
    }

    /// Site position (1-based).
    pub fn position(&self) -> u64 {
        self.interval.start
    }

    /// Total reads at the site.
    pub fn total_count(&self) -> u64 {
        u64::from(self.ref_count) + u64::from(self.alt_count)
    }

    /// Fraction of reads supporting the alternate allele, or `None` with no reads.
    pub fn alt_fraction(&self) -> Option<f64> {
        match self.total_count() {
            0 => None,
            total => Some(f64::from(self.alt_count) / total as f64),
        }
    }
}

impl Locatable for AllelicCount {
    fn contig(&self) -> &str {
        &self.interval.contig
    }

    fn start(&self) -> u64 {
        self.interval.start
    }

    fn end(&self) -> u64 {
        self.interval.end
    }
}

/// Codec for `CONTIG, POSITION, REF_COUNT, ALT_COUNT, REF_NUCLEOTIDE, ALT_NUCLEOTIDE` tables.
#[derive(Debug, Clone)]
pub struct AllelicCountCodec {
    columns: TableColumns,
}

impl Default for AllelicCountCodec {
    fn default() -> Self {
        Self {
            columns: TableColumns::new([
                columns::CONTIG,
                columns::POSITION,
                columns::REF_COUNT,
                columns::ALT_COUNT,
                columns::REF_NUCLEOTIDE,
                columns::ALT_NUCLEOTIDE,
            ]),
        }
    }
}

impl RecordCodec for AllelicCountCodec {
    type Record = AllelicCount;

    fn columns(&self) -> &TableColumns {
        &self.columns
    }

    fn decode(&self, line: &DataLine<'_>) -> Result<AllelicCount> {
        AllelicCount::new(
            line.get(columns::CONTIG)?,
            line.parse(columns::POSITION)?,
            line.parse(columns::REF_COUNT)?,
            line.parse(columns::ALT_COUNT)?,
            line.parse(columns::REF_NUCLEOTIDE)?,
            line.parse(columns::ALT_NUCLEOTIDE)?,
        )
    }

    fn encode(&self, record: &AllelicCount, row: &mut RowBuilder<'_>) {
        row.set(columns::CONTIG, &record.interval.contig)
            .set(columns::POSITION, record.position())
            .set(columns::REF_COUNT, record.ref_count)
            .set(columns::ALT_COUNT, record.alt_count)
            .set(columns::REF_NUCLEOTIDE, record.ref_nucleotide)
            .set(columns::ALT_NUCLEOTIDE, record.alt_nucleotide);
    }
}

/// A sample's allelic counts.
pub type AllelicCountCollection = TsvCollection<AllelicCountCodec>;
