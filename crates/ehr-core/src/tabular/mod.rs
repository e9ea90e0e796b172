//! Tab-delimited parser producing column-oriented tables.
//!
//! The format is deliberately simple: the first line names the columns,
//! every following line holds one record with its fields separated by a
//! single tab. There is no quoting, so a tab inside a value cannot be
//! represented.

mod fields;
mod records;

pub use fields::*;
pub use records::*;

use std::io::{ErrorKind, Read};
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::{EhrError, EhrResult};

const BYTE_ORDER_MARK: char = '\u{feff}';
const FIELD_SEPARATOR: char = '\t';

/// Parse errors.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Line {line} has {found} fields, header has {expected}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column in header: {0}")]
    DuplicateColumn(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Not a number: {0:?}")]
    InvalidNumber(String),

    #[error("Not a YYYY-MM-DD date: {0:?}")]
    InvalidDate(String),
}

/// Column-oriented table: one ordered sequence of cells per header column.
///
/// All columns have the same length and row `i` of every column belongs to
/// the same record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<String>>,
}

impl Table {
    /// Parse tab-delimited text.
    ///
    /// Empty input yields an empty table. `\n`, `\r\n` and a bare `\r` all
    /// end a line. Every line after the header, blank ones included, must
    /// have exactly as many fields as the header.
    pub fn parse_str(text: &str) -> Result<Self, ParseError> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let mut lines = split_lines(text);

        let Some(header_line) = lines.next() else {
            return Ok(Self::default());
        };

        let headers: Vec<String> = header_line
            .trim()
            .split(FIELD_SEPARATOR)
            .map(str::to_string)
            .collect();
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(ParseError::DuplicateColumn(name.clone()));
            }
        }

        let mut columns = vec![Vec::new(); headers.len()];
        for (offset, line) in lines.enumerate() {
            let line = line.trim();
            let values: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if values.len() != headers.len() {
                return Err(ParseError::RowWidth {
                    // 1-based, counting the header
                    line: offset + 2,
                    expected: headers.len(),
                    found: values.len(),
                });
            }

            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value.to_string());
            }
        }

        let table = Self { headers, columns };
        debug!(
            "Parsed table with {} columns and {} rows",
            table.column_count(),
            table.row_count()
        );
        Ok(table)
    }

    /// Parse raw bytes, decoding them as UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::parse_str(std::str::from_utf8(bytes)?)
    }

    /// Read a source to the end and parse it.
    pub fn from_reader<R: Read>(mut reader: R) -> EhrResult<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(&bytes)?)
    }

    /// Column names in header order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// True when the table has no header at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Position of a column in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cells of a column, by name.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.column_index(name).map(|index| self.column_at(index))
    }

    /// Cells of a column, by header position.
    ///
    /// Panics if `index` is out of range.
    pub fn column_at(&self, index: usize) -> &[String] {
        &self.columns[index]
    }

    /// Like [`Table::column_index`] but fails with `MissingColumn`.
    pub fn require_column(&self, name: &str) -> Result<usize, ParseError> {
        self.column_index(name)
            .ok_or_else(|| ParseError::MissingColumn(name.to_string()))
    }

    /// All cells of one row, in header order.
    pub fn row(&self, row: usize) -> Option<Vec<&str>> {
        if row >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|column| column[row].as_str()).collect())
    }
}

/// Split on any line terminator, dropping only the empty piece after a
/// final terminator.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);
    let mut pieces = body.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    });
    let empty = text.is_empty();
    std::iter::from_fn(move || if empty { None } else { pieces.next() })
}

/// Parse one tab-delimited file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> EhrResult<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EhrError::FileNotFound(path.to_path_buf()),
        _ => EhrError::Io(e),
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(Table::from_bytes(&bytes)?)
}

/// Parse a patient file and a lab file into typed tables.
pub fn parse_data<P, L>(patient_path: P, lab_path: L) -> EhrResult<(PatientTable, LabTable)>
where
    P: AsRef<Path>,
    L: AsRef<Path>,
{
    let patients = PatientTable::new(parse_file(patient_path)?)?;
    let labs = LabTable::new(parse_file(lab_path)?)?;
    Ok((patients, labs))
}
