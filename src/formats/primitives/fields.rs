//! Field splitting and parsing utilities.

use crate::formats::primitives::{FormatError, Result};
use std::fmt::Display;
use std::str::FromStr;

/// Splits a line on tabs, optionally checking the field count.
///
/// # Examples
///
/// ```
/// use biotable::formats::primitives::fields::split_fields;
///
/// let fields = split_fields("chr1\t100\t200", Some(3), 1)?;
/// assert_eq!(fields, vec!["chr1", "100", "200"]);
///
/// assert!(split_fields("chr1\t100", Some(3), 1).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn split_fields(line: &str, expected: Option<usize>, line_number: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if let Some(expected) = expected {
        if fields.len() != expected {
            return Err(FormatError::FieldCount {
                expected,
                actual: fields.len(),
                line: line_number,
            });
        }
    }
    Ok(fields)
}

/// Parses a required field value.
///
/// Empty values are rejected before `FromStr` sees them.
pub fn parse_required<T>(value: &str, field: &str, line_number: usize) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    if value.is_empty() {
        return Err(FormatError::InvalidField {
            field: field.to_string(),
            line: line_number,
            reason: "empty value".to_string(),
        });
    }

    value.parse().map_err(|e: T::Err| FormatError::InvalidField {
        field: field.to_string(),
        line: line_number,
        reason: format!("{} ({:?})", e, value),
    })
}
