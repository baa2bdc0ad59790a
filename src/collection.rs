//! Sample-tagged record collections backed by tab-delimited files.
//!
//! A [`TsvCollection`] owns the name of a sample and the records describing it,
//! in input order. Each record type plugs in through a [`RecordCodec`], which
//! declares the mandatory columns and maps one row to one record and back.
//!
//! # File Layout
//!
//! ```text
//! #SAMPLE_NAME=S1            <- metadata comment (exactly one)
//! CONTIG  START  END  VALUE  <- header: mandatory columns, any order, extras allowed
//! chr1    100    200  1.5    <- one record per line
//! chr1    300    400  -0.2
//! ```
//!
//! # Loading
//!
//! Loading is eager and all-or-nothing, checked in this order:
//! 1. the file must open ([`BiotableError::InputNotReadable`])
//! 2. the header must declare every mandatory column ([`BiotableError::SchemaViolation`])
//! 3. the sample comment must be present, unless [`SampleNamePolicy::Fallback`] is set
//! 4. every data line must decode ([`BiotableError::RecordDecodeFailure`])
//!
//! # Example
//!
//! ```
//! use biotable::formats::primitives::{DataLine, GenomicInterval, Locatable, RowBuilder};
//! use biotable::{FnCodec, TableColumns, TsvCollection, TsvOptions};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Scored {
//!     interval: GenomicInterval,
//!     value: f64,
//! }
//!
//! impl Locatable for Scored {
//!     fn contig(&self) -> &str { &self.interval.contig }
//!     fn start(&self) -> u64 { self.interval.start }
//!     fn end(&self) -> u64 { self.interval.end }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = FnCodec::new(
//!     TableColumns::new(["CONTIG", "START", "END", "VALUE"]),
//!     |line: &DataLine<'_>| {
//!         Ok(Scored {
//!             interval: GenomicInterval::new(
//!                 line.get("CONTIG")?,
//!                 line.parse("START")?,
//!                 line.parse("END")?,
//!             )?,
//!             value: line.parse("VALUE")?,
//!         })
//!     },
//!     |record: &Scored, row: &mut RowBuilder<'_>| {
//!         row.set("CONTIG", &record.interval.contig)
//!             .set("START", record.interval.start)
//!             .set("END", record.interval.end)
//!             .set("VALUE", record.value);
//!     },
//! );
//!
//! let records = vec![
//!     Scored { interval: GenomicInterval::new("chr1", 100, 200)?, value: 1.5 },
//!     Scored { interval: GenomicInterval::new("chr1", 300, 400)?, value: -0.2 },
//! ];
//! let collection = TsvCollection::new("S1", records, codec.clone())?;
//!
//! let mut buffer = Vec::new();
//! collection.write_to(&mut buffer)?;
//! assert_eq!(
//!     String::from_utf8(buffer.clone())?,
//!     "#SAMPLE_NAME=S1\nCONTIG\tSTART\tEND\tVALUE\nchr1\t100\t200\t1.5\nchr1\t300\t400\t-0.2\n"
//! );
//!
//! let reloaded = TsvCollection::from_reader(buffer.as_slice(), codec, &TsvOptions::default())?;
//! assert_eq!(reloaded, collection);
//! # Ok(())
//! # }
//! ```

use crate::config::{SampleNamePolicy, TsvOptions};
use crate::error::{BiotableError, Result};
use crate::formats::primitives::{
    self, DataLine, FormatError, GenomicInterval, Locatable, RowBuilder, TableColumns,
    TableReader, TableWriter, SAMPLE_NAME_TAG,
};
use crate::io::{CompressedReader, CompressedWriter};
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info_span, warn};

/// Maps table rows to records of one type and back.
///
/// A codec is bound to a collection when the collection is created and is used
/// for every load and store. `decode` and `encode` must agree on
/// [`RecordCodec::columns`] so that a stored collection loads back equal.
pub trait RecordCodec {
    /// The record type this codec produces.
    type Record: Locatable;

    /// Mandatory columns, in the order they are written.
    fn columns(&self) -> &TableColumns;

    /// Builds a record from one data line.
    ///
    /// Columns are looked up by name; extra columns are ignored.
    fn decode(&self, line: &DataLine<'_>) -> primitives::Result<Self::Record>;

    /// Fills every column of `row` from `record`.
    ///
    /// Leaving a column unset is a bug in the codec and panics on write.
    fn encode(&self, record: &Self::Record, row: &mut RowBuilder<'_>);
}

/// A [`RecordCodec`] built from a pair of closures.
pub struct FnCodec<T, D, E> {
    columns: TableColumns,
    decode: D,
    encode: E,
    _record: PhantomData<fn() -> T>,
}

impl<T, D, E> FnCodec<T, D, E>
where
    D: Fn(&DataLine<'_>) -> primitives::Result<T>,
    E: Fn(&T, &mut RowBuilder<'_>),
{
    /// Binds `decode` and `encode` to the mandatory `columns`.
    pub fn new(columns: TableColumns, decode: D, encode: E) -> Self {
        FnCodec {
            columns,
            decode,
            encode,
            _record: PhantomData,
        }
    }
}

impl<T, D, E> RecordCodec for FnCodec<T, D, E>
where
    T: Locatable,
    D: Fn(&DataLine<'_>) -> primitives::Result<T>,
    E: Fn(&T, &mut RowBuilder<'_>),
{
    type Record = T;

    fn columns(&self) -> &TableColumns {
        &self.columns
    }

    fn decode(&self, line: &DataLine<'_>) -> primitives::Result<T> {
        (self.decode)(line)
    }

    fn encode(&self, record: &T, row: &mut RowBuilder<'_>) {
        (self.encode)(record, row)
    }
}

impl<T, D: Clone, E: Clone> Clone for FnCodec<T, D, E> {
    fn clone(&self) -> Self {
        FnCodec {
            columns: self.columns.clone(),
            decode: self.decode.clone(),
            encode: self.encode.clone(),
            _record: PhantomData,
        }
    }
}

impl<T, D, E> fmt::Debug for FnCodec<T, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCodec")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// A sample name plus an ordered sequence of records.
///
/// Two collections are equal when their sample names and record sequences are
/// equal; the codec does not take part. Records are never reordered,
/// deduplicated, or validated beyond what the codec's decode enforces.
pub struct TsvCollection<C: RecordCodec> {
    sample_name: String,
    records: Vec<C::Record>,
    codec: C,
}

impl<C: RecordCodec> TsvCollection<C> {
    /// Creates a collection from in-memory records.
    ///
    /// # Errors
    ///
    /// Returns [`BiotableError::InvalidSampleName`] if the name is empty or
    /// contains a line break.
    pub fn new(sample_name: impl Into<String>, records: Vec<C::Record>, codec: C) -> Result<Self> {
        let sample_name = sample_name.into();
        validate_sample_name(&sample_name)?;

        Ok(TsvCollection {
            sample_name,
            records,
            codec,
        })
    }

    /// Loads a collection from a file with default options.
    ///
    /// Gzip-compressed files are detected and decompressed.
    ///
    /// # Errors
    ///
    /// See [`TsvCollection::from_path_with_options`].
    pub fn from_path(path: impl AsRef<Path>, codec: C) -> Result<Self> {
        Self::from_path_with_options(path, codec, &TsvOptions::default())
    }

    /// Loads a collection from a file.
    ///
    /// # Errors
    ///
    /// - [`BiotableError::InputNotReadable`] if the file cannot be opened or read
    /// - [`BiotableError::SchemaViolation`] if mandatory columns are missing
    /// - [`BiotableError::BadInput`] for a missing header, duplicate columns, or a
    ///   missing/duplicate/empty sample comment
    /// - [`BiotableError::RecordDecodeFailure`] if any data line fails to decode
    pub fn from_path_with_options(
        path: impl AsRef<Path>,
        codec: C,
        options: &TsvOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let _span = info_span!("load_collection", path = %path.display()).entered();

        let input_error = |source: io::Error| BiotableError::InputNotReadable {
            path: path.to_path_buf(),
            source,
        };

        let reader = CompressedReader::open(path).map_err(input_error)?;
        let collection = Self::read_table(reader, codec, options).map_err(|e| match e {
            BiotableError::Io(source) => input_error(source),
            other => other,
        })?;

        debug!(
            sample = %collection.sample_name,
            records = collection.records.len(),
            "loaded collection"
        );
        Ok(collection)
    }

    /// Loads a collection from any reader (plain or gzip).
    ///
    /// I/O failures surface as [`BiotableError::Io`]; every other error is as
    /// for [`TsvCollection::from_path_with_options`].
    pub fn from_reader<R: Read>(reader: R, codec: C, options: &TsvOptions) -> Result<Self> {
        let reader = CompressedReader::new(BufReader::new(reader))?;
        Self::read_table(reader, codec, options)
    }

    fn read_table<R: BufRead>(reader: R, codec: C, options: &TsvOptions) -> Result<Self> {
        // Phase one: comments and header. Nothing is decoded until the schema holds.
        let mut reader = TableReader::new(reader).map_err(preamble_error)?;
        reader
            .columns()
            .check_mandatory(codec.columns())
            .map_err(preamble_error)?;

        let sample_name = match reader.header().sample_name().map_err(preamble_error)? {
            Some(name) => name.to_string(),
            None => match &options.sample_name_policy {
                SampleNamePolicy::Required => {
                    return Err(BiotableError::bad_input(format!(
                        "no sample name comment ({}{}<name>) found",
                        primitives::COMMENT_PREFIX,
                        SAMPLE_NAME_TAG
                    )));
                }
                SampleNamePolicy::Fallback(name) => {
                    debug!(sample = %name, "no sample name comment, using fallback");
                    name.clone()
                }
            },
        };
        validate_sample_name(&sample_name)?;

        // Phase two: data lines.
        let mut records = Vec::new();
        while let Some(result) = reader.next_record(|line| codec.decode(line)) {
            match result {
                Ok(record) => records.push(record),
                Err(FormatError::Io(e)) => return Err(BiotableError::Io(e)),
                Err(e) => {
                    return Err(BiotableError::RecordDecodeFailure {
                        line: reader.line_number(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(TsvCollection {
            sample_name,
            records,
            codec,
        })
    }

    /// Writes the collection to a file with default options.
    ///
    /// # Errors
    ///
    /// See [`TsvCollection::write_with_options`].
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        self.write_with_options(path, &TsvOptions::default())
    }

    /// Writes the collection to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns [`BiotableError::OutputNotCreatable`] if the file cannot be created,
    /// any write fails, or a record encodes to a row that would not read back
    /// (a value with a tab or line break, or a row starting with `#`). A file
    /// that fails part-way is removed.
    ///
    /// # Panics
    ///
    /// Panics if the codec's `encode` leaves a column unset.
    pub fn write_with_options(&self, path: impl AsRef<Path>, options: &TsvOptions) -> Result<()> {
        let path = path.as_ref();
        let _span = info_span!("write_collection", path = %path.display()).entered();

        let output_error = |source: io::Error| BiotableError::OutputNotCreatable {
            path: path.to_path_buf(),
            source,
        };

        let sink = CompressedWriter::create(path, &options.compression).map_err(output_error)?;
        let compressed = sink.is_compressed();

        if let Err(source) = self.write_table(sink).and_then(CompressedWriter::finish) {
            // Leave no truncated table behind.
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "could not remove partial output");
            }
            return Err(output_error(source));
        }

        debug!(
            sample = %self.sample_name,
            records = self.records.len(),
            compressed,
            "wrote collection"
        );
        Ok(())
    }

    /// Writes the collection to any writer, uncompressed.
    ///
    /// # Errors
    ///
    /// Returns [`BiotableError::Io`] if a write fails. A row that would not read
    /// back is reported the same way, with [`io::ErrorKind::InvalidData`].
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        self.write_table(writer)?;
        Ok(())
    }

    fn write_table<W: Write>(&self, writer: W) -> io::Result<W> {
        let mut writer = TableWriter::new(writer, self.codec.columns().clone());

        writer
            .write_comment(&format!("{}{}", SAMPLE_NAME_TAG, self.sample_name))
            .map_err(into_io_error)?;
        for record in &self.records {
            writer
                .write_record(record, |record, row| self.codec.encode(record, row))
                .map_err(into_io_error)?;
        }
        writer.finish().map_err(into_io_error)
    }

    /// The sample these records describe.
    pub fn sample_name(&self) -> &str {
        &self.sample_name
    }

    /// Records in input order.
    pub fn records(&self) -> &[C::Record] {
        &self.records
    }

    /// Copies every record's coordinates into a new list.
    ///
    /// The intervals are owned by the caller; changing them leaves the
    /// collection untouched.
    pub fn intervals(&self) -> Vec<GenomicInterval> {
        self.records.iter().map(Locatable::to_interval).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The codec bound to this collection.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Consumes the collection, returning the sample name and records.
    pub fn into_parts(self) -> (String, Vec<C::Record>) {
        (self.sample_name, self.records)
    }
}

impl<'a, C: RecordCodec> IntoIterator for &'a TsvCollection<C> {
    type Item = &'a C::Record;
    type IntoIter = std::slice::Iter<'a, C::Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<C> PartialEq for TsvCollection<C>
where
    C: RecordCodec,
    C::Record: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.sample_name == other.sample_name && self.records == other.records
    }
}

impl<C> Eq for TsvCollection<C>
where
    C: RecordCodec,
    C::Record: Eq,
{
}

impl<C> Hash for TsvCollection<C>
where
    C: RecordCodec,
    C::Record: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sample_name.hash(state);
        self.records.hash(state);
    }
}

impl<C> Clone for TsvCollection<C>
where
    C: RecordCodec + Clone,
    C::Record: Clone,
{
    fn clone(&self) -> Self {
        TsvCollection {
            sample_name: self.sample_name.clone(),
            records: self.records.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<C> fmt::Debug for TsvCollection<C>
where
    C: RecordCodec,
    C::Record: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsvCollection")
            .field("sample_name", &self.sample_name)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

fn validate_sample_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['\n', '\r']) {
        return Err(BiotableError::InvalidSampleName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Maps header-phase errors onto the crate taxonomy.
fn preamble_error(err: FormatError) -> BiotableError {
    match err {
        FormatError::MissingColumns { missing } => BiotableError::SchemaViolation { missing },
        FormatError::Io(e) => BiotableError::Io(e),
        other => BiotableError::bad_input(other.to_string()),
    }
}

fn into_io_error(err: FormatError) -> io::Error {
    match err {
        FormatError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
