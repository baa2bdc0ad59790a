//! Table header parsing: metadata comments and the column line.
//!
//! Every table starts with a preamble:
//! - `#`-prefixed comment lines, one of which is `#SAMPLE_NAME=<name>`
//! - the column header, the first line that is neither blank nor a comment
//!
//! Parsing the preamble is the first of two phases. The reader is left
//! positioned at the first data line, so a schema problem surfaces once,
//! before any record is decoded.

use crate::formats::primitives::{FormatError, Result, TableColumns};
use std::io::BufRead;

/// Marker that starts every comment line.
pub const COMMENT_PREFIX: &str = "#";

/// Tag that identifies the sample-name comment (after [`COMMENT_PREFIX`]).
pub const SAMPLE_NAME_TAG: &str = "SAMPLE_NAME=";

/// Parsed table preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    /// Comment lines preceding the header, without the `#` prefix.
    pub comments: Vec<String>,
    /// Columns declared by the header line.
    pub columns: TableColumns,
}

impl TableHeader {
    /// Reads comments and the header line from `reader`.
    ///
    /// `line_number` is advanced past every line consumed (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingHeader`] if the input ends before a header
    /// line, column errors from [`TableColumns::from_header`], or an I/O error.
    pub fn parse<R: BufRead>(reader: &mut R, line_number: &mut usize) -> Result<Self> {
        let mut comments = Vec::new();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(FormatError::MissingHeader);
            }
            *line_number += 1;

            let text = trim_line_ending(&line);
            if text.trim().is_empty() {
                continue;
            }

            if let Some(comment) = text.strip_prefix(COMMENT_PREFIX) {
                tracing::trace!(line = *line_number, comment, "header comment");
                comments.push(comment.to_string());
                continue;
            }

            let columns = TableColumns::from_header(text)?;
            return Ok(TableHeader { comments, columns });
        }
    }

    /// Returns the sample name carried by the `#SAMPLE_NAME=` comment.
    ///
    /// Returns `Ok(None)` when no such comment is present.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidHeader`] if the comment appears more than
    /// once or carries an empty name.
    ///
    /// # Examples
    ///
    /// ```
    /// use biotable::formats::primitives::TableHeader;
    ///
    /// let data = "#SAMPLE_NAME=tumor\n#other\nCONTIG\tSTART\tEND\n";
    /// let header = TableHeader::parse(&mut data.as_bytes(), &mut 0)?;
    /// assert_eq!(header.sample_name()?, Some("tumor"));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn sample_name(&self) -> Result<Option<&str>> {
        let mut names = self
            .comments
            .iter()
            .filter_map(|comment| comment.strip_prefix(SAMPLE_NAME_TAG));

        let name = match names.next() {
            Some(name) => name,
            None => return Ok(None),
        };

        if names.next().is_some() {
            return Err(FormatError::InvalidHeader(
                "multiple sample name comments".to_string(),
            ));
        }

        if name.is_empty() {
            return Err(FormatError::InvalidHeader("empty sample name".to_string()));
        }

        Ok(Some(name))
    }
}

/// Strips a trailing `\n` or `\r\n`, leaving tabs and spaces intact.
pub(crate) fn trim_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
