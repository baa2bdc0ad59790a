//! Ordered column sets and the mandatory-column check.
//!
//! A [`TableColumns`] is an ordered list of unique column names. Record types
//! declare one as their mandatory set; readers build one from the header line
//! of each file. Validation compares the two by name, never by position.
//!
//! # Examples
//!
//! ```
//! use biotable::formats::primitives::TableColumns;
//!
//! let mandatory = TableColumns::new(["CONTIG", "START", "END"]);
//! let present = TableColumns::from_header("END\tSTART\tNOTE")?;
//!
//! let err = present.check_mandatory(&mandatory).unwrap_err();
//! assert_eq!(err.to_string(), "Missing mandatory columns: CONTIG");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::formats::primitives::{FormatError, Result, COMMENT_PREFIX};
use std::collections::HashSet;
use std::fmt;

/// An ordered set of unique column names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableColumns {
    names: Vec<String>,
}

impl TableColumns {
    /// Creates a column set from names declared in code.
    ///
    /// # Panics
    ///
    /// Panics if a name is blank, contains a tab or line break, or is repeated,
    /// or if the first name starts with `#`.
    /// Declared column sets are fixed per record type, so this is a programming error.
    ///
    /// # Examples
    ///
    /// ```
    /// use biotable::formats::primitives::TableColumns;
    ///
    /// let columns = TableColumns::new(["CONTIG", "START", "END", "VALUE"]);
    /// assert_eq!(columns.len(), 4);
    /// assert_eq!(columns.index_of("END"), Some(2));
    /// ```
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        match Self::try_from_names(names) {
            Ok(columns) => columns,
            Err(e) => panic!("invalid declared column set: {}", e),
        }
    }

    /// Parses the column set from a header line.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::InvalidHeader`] for an empty column name and
    /// [`FormatError::DuplicateColumn`] if a name appears twice.
    pub fn from_header(line: &str) -> Result<Self> {
        Self::try_from_names(line.split('\t').map(str::to_string).collect())
    }

    fn try_from_names(names: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(FormatError::InvalidHeader("empty column name".to_string()));
            }
            // A header line starting with '#' would read back as a comment.
            if i == 0 && name.starts_with(COMMENT_PREFIX) {
                return Err(FormatError::InvalidHeader(format!(
                    "first column name {:?} starts with '{}'",
                    name, COMMENT_PREFIX
                )));
            }
            if name.contains(['\t', '\n', '\r']) {
                return Err(FormatError::InvalidHeader(format!(
                    "column name {:?} contains a delimiter",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(FormatError::DuplicateColumn(name.clone()));
            }
        }
        Ok(TableColumns { names })
    }

    /// Column names in declared order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a column, if present.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns `true` if the column is present.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Mandatory columns absent from this set, in the mandatory set's order.
    pub fn missing_from(&self, mandatory: &TableColumns) -> Vec<String> {
        mandatory
            .names
            .iter()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect()
    }

    /// Checks that every mandatory column is present in this set.
    ///
    /// Column order and extra columns are irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingColumns`] naming every absent column.
    pub fn check_mandatory(&self, mandatory: &TableColumns) -> Result<()> {
        let missing = self.missing_from(mandatory);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormatError::MissingColumns { missing })
        }
    }

    /// The header line for this column set (no trailing newline).
    pub fn header_line(&self) -> String {
        self.names.join("\t")
    }
}

impl fmt::Display for TableColumns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(", "))
    }
}
