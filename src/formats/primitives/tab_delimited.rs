//! Generic tab-delimited table reading and writing.
//!
//! Tables share a common shape:
//! - Comment lines (starting with `#`) carrying metadata
//! - A header line naming the columns
//! - Tab-delimited data lines, one record each
//!
//! # Design
//!
//! [`TableReader`] parses the header up front and then hands each data line to a
//! decode function as a [`DataLine`], which looks fields up by column name.
//! [`TableWriter`] mirrors it: an encode function fills a [`RowBuilder`] laid out
//! in the writer's column order.
//!
//! # Examples
//!
//! ```
//! use biotable::formats::primitives::{
//!     GenomicInterval, Result, TableColumns, TableReader, TableWriter,
//! };
//!
//! let columns = TableColumns::new(["CONTIG", "START", "END"]);
//!
//! // Write
//! let mut writer = TableWriter::new(Vec::new(), columns.clone());
//! writer.write_comment("SAMPLE_NAME=S1")?;
//! let interval = GenomicInterval::new("chr1", 100, 200)?;
//! writer.write_record(&interval, |iv, row| {
//!     row.set("CONTIG", &iv.contig).set("START", iv.start).set("END", iv.end);
//! })?;
//! let bytes = writer.finish()?;
//! assert_eq!(bytes, b"#SAMPLE_NAME=S1\nCONTIG\tSTART\tEND\nchr1\t100\t200\n");
//!
//! // Read back
//! let mut reader = TableReader::new(bytes.as_slice())?;
//! let intervals: Vec<GenomicInterval> = reader
//!     .records(|line| {
//!         GenomicInterval::new(line.get("CONTIG")?, line.parse("START")?, line.parse("END")?)
//!     })
//!     .collect::<Result<_>>()?;
//! assert_eq!(intervals, vec![interval]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::formats::primitives::fields::{parse_required, split_fields};
use crate::formats::primitives::header::trim_line_ending;
use crate::formats::primitives::{
    FormatError, Result, TableColumns, TableHeader, COMMENT_PREFIX,
};
use std::fmt::{Display, Write as _};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// One data line, with fields addressable by column name.
#[derive(Debug)]
pub struct DataLine<'a> {
    columns: &'a TableColumns,
    fields: Vec<&'a str>,
    line_number: usize,
}

impl<'a> DataLine<'a> {
    /// Splits `line` into fields aligned to `columns`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::FieldCount`] if the number of fields differs from
    /// the number of columns.
    pub fn new(columns: &'a TableColumns, line: &'a str, line_number: usize) -> Result<Self> {
        let fields = split_fields(line, Some(columns.len()), line_number)?;
        Ok(DataLine {
            columns,
            fields,
            line_number,
        })
    }

    /// Raw text of a column.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingColumn`] if the header does not declare it.
    pub fn get(&self, column: &str) -> Result<&'a str> {
        self.columns
            .index_of(column)
            .map(|i| self.fields[i])
            .ok_or_else(|| FormatError::MissingColumn {
                column: column.to_string(),
                line: self.line_number,
            })
    }

    /// Parses a column's value.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingColumn`] or [`FormatError::InvalidField`].
    pub fn parse<T>(&self, column: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_required(self.get(column)?, column, self.line_number)
    }

    /// Line number in the source (1-based).
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Columns declared by the source header.
    pub fn columns(&self) -> &TableColumns {
        self.columns
    }

    /// Fields in header order.
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }
}

/// One output row under construction, laid out in the writer's column order.
#[derive(Debug)]
pub struct RowBuilder<'a> {
    columns: &'a TableColumns,
    values: Vec<Option<String>>,
}

impl<'a> RowBuilder<'a> {
    /// Creates an empty row for `columns`.
    pub fn new(columns: &'a TableColumns) -> Self {
        RowBuilder {
            columns,
            values: vec![None; columns.len()],
        }
    }

    /// Sets a column's value from its `Display` form.
    ///
    /// Values are checked when the row is written (see [`RowBuilder::to_line`]).
    ///
    /// # Panics
    ///
    /// Panics if the column is not part of the row, which means the encode
    /// function does not match its column set.
    pub fn set(&mut self, column: &str, value: impl Display) -> &mut Self {
        let index = match self.columns.index_of(column) {
            Some(index) => index,
            None => panic!("column '{}' is not in {}", column, self.columns),
        };

        let slot = self.values[index].get_or_insert_with(String::new);
        slot.clear();
        // Writing into a String cannot fail.
        let _ = write!(slot, "{}", value);
        self
    }

    /// Columns that have not been set yet.
    pub fn unset_columns(&self) -> Vec<&str> {
        self.columns
            .names()
            .iter()
            .zip(&self.values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Clears every value so the row can be reused.
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|value| *value = None);
    }

    /// Joins the values into a line (no trailing newline).
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnwritableValue`] if the line would not read back
    /// as this row: a value holds a tab or line break, the line starts with `#`
    /// (a comment), or the line is blank (skipped).
    ///
    /// # Panics
    ///
    /// Panics if any column is unset.
    pub fn to_line(&self) -> Result<String> {
        let unset = self.unset_columns();
        assert!(unset.is_empty(), "encode left columns unset: {:?}", unset);

        let names = self.columns.names();
        let capacity = self.values.iter().flatten().map(|v| v.len() + 1).sum();
        let mut line = String::with_capacity(capacity);
        for (i, (name, value)) in names.iter().zip(self.values.iter().flatten()).enumerate() {
            if value.contains(['\t', '\n', '\r']) {
                return Err(FormatError::UnwritableValue {
                    column: name.clone(),
                    reason: format!("value {:?} contains a tab or line break", value),
                });
            }
            if i > 0 {
                line.push('\t');
            }
            line.push_str(value);
        }

        let first = names.first().cloned().unwrap_or_default();
        if line.starts_with(COMMENT_PREFIX) {
            return Err(FormatError::UnwritableValue {
                column: first,
                reason: format!("line {:?} would read back as a comment", line),
            });
        }
        if line.trim().is_empty() {
            return Err(FormatError::UnwritableValue {
                column: first,
                reason: "row is blank and would be skipped on read".to_string(),
            });
        }
        Ok(line)
    }
}

/// Reader for tables with a metadata preamble and a column header.
///
/// The header is parsed by [`TableReader::new`]. Data lines are then decoded one
/// at a time. Automatically skips:
/// - Empty lines
/// - Comment lines (starting with `#`) after the header
pub struct TableReader<R: BufRead> {
    reader: R,
    header: TableHeader,
    line_buf: String,
    line_number: usize,
}

impl<R: BufRead> TableReader<R> {
    /// Creates a reader and parses the table header.
    ///
    /// # Errors
    ///
    /// Returns the header errors of [`TableHeader::parse`].
    pub fn new(mut reader: R) -> Result<Self> {
        let mut line_number = 0;
        let header = TableHeader::parse(&mut reader, &mut line_number)?;

        Ok(TableReader {
            reader,
            header,
            line_buf: String::with_capacity(1024),
            line_number,
        })
    }

    /// The parsed preamble.
    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    /// Columns declared by the header.
    pub fn columns(&self) -> &TableColumns {
        &self.header.columns
    }

    /// Returns the current line number (1-based).
    ///
    /// Useful for error reporting.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads and decodes the next data line.
    ///
    /// Returns `None` at end of input.
    pub fn next_record<T, F>(&mut self, decode: F) -> Option<Result<T>>
    where
        F: FnOnce(&DataLine<'_>) -> Result<T>,
    {
        loop {
            self.line_buf.clear();

            match self.reader.read_line(&mut self.line_buf) {
                Ok(0) => return None, // EOF
                Ok(_) => {
                    self.line_number += 1;

                    let line = trim_line_ending(&self.line_buf);

                    // Skip empty lines
                    if line.trim().is_empty() {
                        continue;
                    }

                    // Skip comments
                    if line.starts_with(COMMENT_PREFIX) {
                        continue;
                    }

                    let data_line =
                        match DataLine::new(&self.header.columns, line, self.line_number) {
                            Ok(data_line) => data_line,
                            Err(e) => return Some(Err(e)),
                        };
                    return Some(decode(&data_line));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    /// Iterates over the remaining data lines, decoding each with `decode`.
    pub fn records<T, F>(&mut self, decode: F) -> Records<'_, R, F>
    where
        F: FnMut(&DataLine<'_>) -> Result<T>,
    {
        Records {
            reader: self,
            decode,
        }
    }

    /// Consumes the reader, returning the underlying input.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Iterator over decoded records, created by [`TableReader::records`].
pub struct Records<'r, R: BufRead, F> {
    reader: &'r mut TableReader<R>,
    decode: F,
}

impl<'r, R, F, T> Iterator for Records<'r, R, F>
where
    R: BufRead,
    F: FnMut(&DataLine<'_>) -> Result<T>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record(&mut self.decode)
    }
}

/// Writer for tables with a metadata preamble and a column header.
///
/// Comments go first, then the header, then rows. The header is written
/// automatically before the first row, or by [`TableWriter::finish`] for a
/// table with no rows.
pub struct TableWriter<W: Write> {
    writer: W,
    columns: TableColumns,
    header_written: bool,
    records_written: usize,
}

impl<W: Write> TableWriter<W> {
    /// Creates a writer emitting `columns` in their declared order.
    pub fn new(writer: W, columns: TableColumns) -> Self {
        TableWriter {
            writer,
            columns,
            header_written: false,
            records_written: 0,
        }
    }

    /// Writes a `#`-prefixed comment line.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidComment`] if the text contains a line break
    /// or the header has already been written, or an I/O error.
    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        if self.header_written || text.contains(['\n', '\r']) {
            return Err(FormatError::InvalidComment(text.to_string()));
        }
        writeln!(self.writer, "{}{}", COMMENT_PREFIX, text)?;
        Ok(())
    }

    /// Writes the column header if it has not been written yet.
    pub fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", self.columns.header_line())?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Writes one record, letting `encode` fill its row.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnwritableValue`] if the encoded row would not
    /// read back (see [`RowBuilder::to_line`]); nothing is written for it.
    ///
    /// # Panics
    ///
    /// Panics if `encode` leaves a column unset (see [`RowBuilder`]).
    pub fn write_record<T, F>(&mut self, record: &T, encode: F) -> Result<()>
    where
        F: FnOnce(&T, &mut RowBuilder<'_>),
    {
        self.write_header()?;

        let mut row = RowBuilder::new(&self.columns);
        encode(record, &mut row);
        let line = row.to_line()?;
        writeln!(self.writer, "{}", line)?;

        self.records_written += 1;
        Ok(())
    }

    /// Columns this writer emits.
    pub fn columns(&self) -> &TableColumns {
        &self.columns
    }

    /// Get the number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Writes the header if needed, flushes, and returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}
