//! Integration tests for loading and storing collections on disk

use biotable::formats::primitives::{DataLine, Result as FormatResult, RowBuilder};
use biotable::records::{CopyRatio, CopyRatioCodec, CopyRatioCollection};
use biotable::{
    BiotableError, Compression, GenomicInterval, Locatable, RecordCodec, SampleNamePolicy,
    TableColumns, TsvCollection, TsvOptions,
};
use proptest::prelude::*;
use std::fs;
use std::io::Read;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
struct Scored {
    interval: GenomicInterval,
    value: f64,
}

impl Locatable for Scored {
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

#[derive(Debug, Clone)]
struct ScoredCodec {
    columns: TableColumns,
}

impl Default for ScoredCodec {
    fn default() -> Self {
        Self {
            columns: TableColumns::new(["CONTIG", "START", "END", "VALUE"]),
        }
    }
}

impl RecordCodec for ScoredCodec {
    type Record = Scored;

    fn columns(&self) -> &TableColumns {
        &self.columns
    }

    fn decode(&self, line: &DataLine<'_>) -> FormatResult<Scored> {
        Ok(Scored {
            interval: GenomicInterval::new(
                line.get("CONTIG")?,
                line.parse("START")?,
                line.parse("END")?,
            )?,
            value: line.parse("VALUE")?,
        })
    }

    fn encode(&self, record: &Scored, row: &mut RowBuilder<'_>) {
        row.set("CONTIG", &record.interval.contig)
            .set("START", record.interval.start)
            .set("END", record.interval.end)
            .set("VALUE", record.value);
    }
}

type ScoredCollection = TsvCollection<ScoredCodec>;

fn scored(contig: &str, start: u64, end: u64, value: f64) -> Scored {
    Scored {
        interval: GenomicInterval::new(contig, start, end).unwrap(),
        value,
    }
}

fn example_collection() -> ScoredCollection {
    ScoredCollection::new(
        "S1",
        vec![scored("chr1", 100, 200, 1.5), scored("chr1", 300, 400, -0.2)],
        ScoredCodec::default(),
    )
    .unwrap()
}

#[test]
fn test_store_writes_expected_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scored.tsv");

    example_collection().write(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "#SAMPLE_NAME=S1",
            "CONTIG\tSTART\tEND\tVALUE",
            "chr1\t100\t200\t1.5",
            "chr1\t300\t400\t-0.2",
        ]
    );
}

#[test]
fn test_store_then_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scored.tsv");

    let original = example_collection();
    original.write(&path).unwrap();
    let loaded = ScoredCollection::from_path(&path, ScoredCodec::default()).unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loaded.sample_name(), "S1");
    assert_eq!(loaded.records(), original.records());
}

#[test]
fn test_store_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scored.tsv");
    let stale = "stale contents that are much longer than the new table will be\n".repeat(10);
    fs::write(&path, stale).unwrap();

    example_collection().write(&path).unwrap();

    let loaded = ScoredCollection::from_path(&path, ScoredCodec::default()).unwrap();
    assert_eq!(loaded, example_collection());
}

#[test]
fn test_gzip_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scored.tsv.gz");

    let original = example_collection();
    original.write(&path).unwrap();

    let mut magic = [0u8; 2];
    fs::File::open(&path).unwrap().read_exact(&mut magic).unwrap();
    assert_eq!(magic, [0x1f, 0x8b]);

    let loaded = ScoredCollection::from_path(&path, ScoredCodec::default()).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_forced_gzip_without_extension_still_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scored.tsv");

    let options = TsvOptions::new().with_compression(Compression::Gzip);
    example_collection().write_with_options(&path, &options).unwrap();

    assert!(fs::read_to_string(&path).is_err(), "expected binary gzip output");
    let loaded = ScoredCollection::from_path(&path, ScoredCodec::default()).unwrap();
    assert_eq!(loaded, example_collection());
}

#[test]
fn test_load_nonexistent_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.tsv");

    match ScoredCollection::from_path(&path, ScoredCodec::default()) {
        Err(BiotableError::InputNotReadable { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected InputNotReadable, got {:?}", other),
    }
}

#[test]
fn test_load_directory_is_not_readable() {
    let dir = TempDir::new().unwrap();

    let result = ScoredCollection::from_path(dir.path(), ScoredCodec::default());
    assert!(matches!(result, Err(BiotableError::InputNotReadable { .. })));
}

#[test]
fn test_store_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("scored.tsv");

    match example_collection().write(&path) {
        Err(BiotableError::OutputNotCreatable { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected OutputNotCreatable, got {:?}", other),
    }
    assert!(!path.exists());
}

/// A copy ratio whose contig was set directly, bypassing `GenomicInterval::new`.
fn copy_ratio_on(contig: &str, start: u64, value: f64) -> CopyRatio {
    let interval = GenomicInterval {
        contig: contig.to_string(),
        start,
        end: start + 99,
    };
    CopyRatio::new(interval, value)
}

#[test]
fn test_interval_rejects_contigs_that_would_not_read_back() {
    assert!(GenomicInterval::new("#chrUn", 1, 100).is_err());
    assert!(GenomicInterval::new("chr\t1", 1, 100).is_err());
}

#[test]
fn test_store_refuses_row_that_would_load_as_comment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hidden.tsv");

    let collection = CopyRatioCollection::new(
        "S1",
        vec![copy_ratio_on("#chrUn", 1, 0.5), copy_ratio_on("chr1", 1, 0.1)],
        CopyRatioCodec::default(),
    )
    .unwrap();

    match collection.write(&path) {
        Err(BiotableError::OutputNotCreatable { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected OutputNotCreatable, got {:?}", other),
    }
    assert!(!path.exists());
}

#[test]
fn test_failed_store_removes_partial_file() {
    let dir = TempDir::new().unwrap();

    for name in ["partial.tsv", "partial.tsv.gz"] {
        let path = dir.path().join(name);
        fs::write(&path, "previous contents\n").unwrap();

        // The first row is fine; the second splits into extra fields.
        let collection = CopyRatioCollection::new(
            "S1",
            vec![copy_ratio_on("chr1", 1, 0.5), copy_ratio_on("chr\t1", 201, 0.1)],
            CopyRatioCodec::default(),
        )
        .unwrap();

        let result = collection.write(&path);
        assert!(
            matches!(result, Err(BiotableError::OutputNotCreatable { .. })),
            "{}: got {:?}",
            name,
            result
        );
        assert!(!path.exists(), "{} was left behind", name);
    }
}

#[test]
fn test_load_reports_exactly_the_missing_columns() {
    let dir = TempDir::new().unwrap();
    let all = ["CONTIG", "START", "END", "VALUE"];

    for mask in 1u32..(1 << all.len()) {
        let kept: Vec<&str> = (0..all.len())
            .filter(|i| mask & (1 << i) == 0)
            .map(|i| all[i])
            .collect();
        let removed: Vec<String> = (0..all.len())
            .filter(|i| mask & (1 << i) != 0)
            .map(|i| all[i].to_string())
            .collect();

        let mut header = kept.join("\t");
        if header.is_empty() {
            header.push_str("COMMENT");
        }
        let path = dir.path().join(format!("subset_{}.tsv", mask));
        fs::write(&path, format!("#SAMPLE_NAME=S1\n{}\n", header)).unwrap();

        match ScoredCollection::from_path(&path, ScoredCodec::default()) {
            Err(BiotableError::SchemaViolation { missing }) => assert_eq!(missing, removed),
            other => panic!("Expected SchemaViolation for mask {}, got {:?}", mask, other),
        }
    }
}

#[test]
fn test_load_preserves_file_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unsorted.tsv");
    fs::write(
        &path,
        "#SAMPLE_NAME=S1\n\
         CONTIG\tSTART\tEND\tVALUE\n\
         chr2\t500\t600\t0.1\n\
         chr1\t100\t200\t0.2\n\
         chr10\t1\t2\t0.3\n",
    )
    .unwrap();

    let loaded = ScoredCollection::from_path(&path, ScoredCodec::default()).unwrap();
    let intervals: Vec<String> = loaded.intervals().iter().map(|i| i.to_string()).collect();
    assert_eq!(intervals, vec!["chr2:500-600", "chr1:100-200", "chr10:1-2"]);
}

#[test]
fn test_load_without_sample_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anonymous.tsv");
    fs::write(&path, "CONTIG\tSTART\tEND\tVALUE\nchr1\t1\t2\t0.5\n").unwrap();

    let result = ScoredCollection::from_path(&path, ScoredCodec::default());
    assert!(matches!(result, Err(BiotableError::BadInput { .. })));

    let policy = SampleNamePolicy::Fallback("anonymous".to_string());
    let options = TsvOptions::new().with_sample_name_policy(policy);
    let loaded =
        ScoredCollection::from_path_with_options(&path, ScoredCodec::default(), &options).unwrap();
    assert_eq!(loaded.sample_name(), "anonymous");
}

#[test]
fn test_load_decode_failure_returns_no_partial_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad_row.tsv");
    fs::write(
        &path,
        "#SAMPLE_NAME=S1\n\
         CONTIG\tSTART\tEND\tVALUE\n\
         chr1\t1\t2\t0.5\n\
         chr1\t3\t4\tNA-value\n",
    )
    .unwrap();

    match ScoredCollection::from_path(&path, ScoredCodec::default()) {
        Err(BiotableError::RecordDecodeFailure { line, reason }) => {
            assert_eq!(line, 4);
            assert!(reason.contains("VALUE"), "reason was {}", reason);
        }
        other => panic!("Expected RecordDecodeFailure, got {:?}", other),
    }
}

#[test]
fn test_interval_projection_does_not_alias_records() {
    let collection = example_collection();

    let mut intervals = collection.intervals();
    intervals[1].end = 99_999;
    intervals.clear();

    assert_eq!(collection.records()[1].interval.end, 400);
    assert_eq!(collection.intervals().len(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_round_trip_property(
        sample in "[A-Za-z0-9_.-]{1,16}",
        rows in prop::collection::vec(
            ("chr[0-9XYM]{1,2}", 1u64..1_000_000, 0u64..10_000, -10.0f64..10.0),
            0..20,
        ),
    ) {
        let records: Vec<Scored> = rows
            .into_iter()
            .map(|(contig, start, len, value)| scored(&contig, start, start + len, value))
            .collect();
        let original = ScoredCollection::new(sample, records, ScoredCodec::default()).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prop.tsv");
        original.write(&path).unwrap();
        let loaded = ScoredCollection::from_path(&path, ScoredCodec::default()).unwrap();

        prop_assert_eq!(loaded, original);
    }
}
