//! Per-interval log2 copy ratios.

use super::{columns, decode_interval, encode_interval};
use crate::collection::{RecordCodec, TsvCollection};
use crate::formats::primitives::{
    DataLine, GenomicInterval, Locatable, Result, RowBuilder, TableColumns,
};

/// Log2 copy ratio of one interval.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyRatio {
    /// Covered interval
    pub interval: GenomicInterval,
    /// Log2 of the denoised copy ratio
    pub log2_copy_ratio: f64,
}

impl CopyRatio {
    /// Create a new copy ratio
    pub fn new(interval: GenomicInterval, log2_copy_ratio: f64) -> Self {
        Self {
            interval,
            log2_copy_ratio,
        }
    }
}

impl Locatable for CopyRatio {
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

/// Codec for `CONTIG, START, END, LOG2_COPY_RATIO` tables.
#[derive(Debug, Clone)]
pub struct CopyRatioCodec {
    columns: TableColumns,
}

impl Default for CopyRatioCodec {
    fn default() -> Self {
        Self {
            columns: TableColumns::new([
                columns::CONTIG,
                columns::START,
                columns::END,
                columns::LOG2_COPY_RATIO,
            ]),
        }
    }
}

impl RecordCodec for CopyRatioCodec {
    type Record = CopyRatio;

    fn columns(&self) -> &TableColumns {
        &self.columns
    }

    fn decode(&self, line: &DataLine<'_>) -> Result<CopyRatio> {
        Ok(CopyRatio {
            interval: decode_interval(line)?,
            log2_copy_ratio: line.parse(columns::LOG2_COPY_RATIO)?,
        })
    }

    fn encode(&self, record: &CopyRatio, row: &mut RowBuilder<'_>) {
        encode_interval(&record.interval, row);
        row.set(columns::LOG2_COPY_RATIO, record.log2_copy_ratio);
    }
}

/// A sample's copy ratios.
pub type CopyRatioCollection = TsvCollection<CopyRatioCodec>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TsvOptions;

    #[test]
    fn test_load_copy_ratios() {
        let data = "#SAMPLE_NAME=normal\n\
                    CONTIG\tSTART\tEND\tLOG2_COPY_RATIO\n\
                    chr1\t1\t100\t-0.5\n\
                    chrX\t200\t300\t0\n";
        let codec = CopyRatioCodec::default();
        let collection =
            CopyRatioCollection::from_reader(data.as_bytes(), codec, &TsvOptions::default())
                .unwrap();

        assert_eq!(collection.sample_name(), "normal");
        assert_eq!(collection.records()[0].log2_copy_ratio, -0.5);
        assert_eq!(collection.records()[1].interval.contig, "chrX");
        assert_eq!(collection.records()[1].log2_copy_ratio, 0.0);
    }

    #[test]
    fn test_write_copy_ratios() {
        let collection = CopyRatioCollection::new(
            "normal",
            vec![CopyRatio::new(GenomicInterval::new("chr1", 1, 100).unwrap(), 0.125)],
            CopyRatioCodec::default(),
        )
        .unwrap();

        let mut out = Vec::new();
        collection.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#SAMPLE_NAME=normal\nCONTIG\tSTART\tEND\tLOG2_COPY_RATIO\nchr1\t1\t100\t0.125\n"
        );
    }
}
