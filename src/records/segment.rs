//! Copy-ratio segments.

use super::{columns, decode_interval, encode_interval};
use crate::collection::{RecordCodec, TsvCollection};
use crate::formats::primitives::{
    DataLine, GenomicInterval, Locatable, Result, RowBuilder, TableColumns,
};

/// A segment: a run of intervals sharing one copy-number state.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyRatioSegment {
    /// Span of the segment
    pub interval: GenomicInterval,
    /// Number of copy ratios the segment was built from
    pub num_points_copy_ratio: u32,
    /// Mean log2 copy ratio over those points
    pub mean_log2_copy_ratio: f64,
}

impl CopyRatioSegment {
    /// Create a new segment
    pub fn new(
        interval: GenomicInterval,
        num_points_copy_ratio: u32,
        mean_log2_copy_ratio: f64,
    ) -> Self {
        Self {
            interval,
            num_points_copy_ratio,
            mean_log2_copy_ratio,
        }
    }
}

impl Locatable for CopyRatioSegment {
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

/// Codec for `CONTIG, START, END, NUM_POINTS_COPY_RATIO, MEAN_LOG2_COPY_RATIO` tables.
#[derive(Debug, Clone)]
pub struct CopyRatioSegmentCodec {
    columns: TableColumns,
}

impl Default for CopyRatioSegmentCodec {
    fn default() -> Self {
        Self {
            columns: TableColumns::new([
                columns::CONTIG,
                columns::START,
                columns::END,
                columns::NUM_POINTS_COPY_RATIO,
                columns::MEAN_LOG2_COPY_RATIO,
            ]),
        }
    }
}

impl RecordCodec for CopyRatioSegmentCodec {
    type Record = CopyRatioSegment;

    fn columns(&self) -> &TableColumns {
        &self.columns
    }

    fn decode(&self, line: &DataLine<'_>) -> Result<CopyRatioSegment> {
        Ok(CopyRatioSegment {
            interval: decode_interval(line)?,
            num_points_copy_ratio: line.parse(columns::NUM_POINTS_COPY_RATIO)?,
            mean_log2_copy_ratio: line.parse(columns::MEAN_LOG2_COPY_RATIO)?,
        })
    }

    fn encode(&self, record: &CopyRatioSegment, row: &mut RowBuilder<'_>) {
        encode_interval(&record.interval, row);
        row.set(columns::NUM_POINTS_COPY_RATIO, record.num_points_copy_ratio)
            .set(columns::MEAN_LOG2_COPY_RATIO, record.mean_log2_copy_ratio);
    }
}

/// A sample's copy-ratio segments.
pub type CopyRatioSegmentCollection = TsvCollection<CopyRatioSegmentCodec>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BiotableError, TsvOptions};

    fn load(data: &str) -> crate::Result<CopyRatioSegmentCollection> {
        CopyRatioSegmentCollection::from_reader(
            data.as_bytes(),
            CopyRatioSegmentCodec::default(),
            &TsvOptions::default(),
        )
    }

    #[test]
    fn test_load_segments() {
        let collection = load(
            "#SAMPLE_NAME=tumor\n\
             CONTIG\tSTART\tEND\tNUM_POINTS_COPY_RATIO\tMEAN_LOG2_COPY_RATIO\n\
             chr1\t1\t5000\t50\t0.03\n\
             chr1\t5001\t9000\t12\t-1.1\n",
        )
        .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.records()[0].num_points_copy_ratio, 50);
        assert_eq!(collection.records()[1].mean_log2_copy_ratio, -1.1);
        assert_eq!(collection.intervals()[1].to_string(), "chr1:5001-9000");
    }

    #[test]
    fn test_negative_point_count_is_decode_failure() {
        let result = load(
            "#SAMPLE_NAME=tumor\n\
             CONTIG\tSTART\tEND\tNUM_POINTS_COPY_RATIO\tMEAN_LOG2_COPY_RATIO\n\
             chr1\t1\t5000\t-3\t0.03\n",
        );
        assert!(matches!(result, Err(BiotableError::RecordDecodeFailure { line: 3, .. })));
    }

    #[test]
    fn test_missing_segment_columns() {
        let result = load("#SAMPLE_NAME=tumor\nCONTIG\tSTART\tEND\n");
        match result {
            Err(BiotableError::SchemaViolation { missing }) => {
                assert_eq!(missing, vec!["NUM_POINTS_COPY_RATIO", "MEAN_LOG2_COPY_RATIO"]);
            }
            other => panic!("Expected SchemaViolation, got {:?}", other),
        }
    }
}
