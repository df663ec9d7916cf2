//! In-memory numeric table.
//!
//! `Table` is the single data structure that flows through the pipeline:
//! the loader produces one from an analysed DMQMC file, the extractor
//! consumes it and returns a new one, and the output layer formats it.

use serde::{Deserialize, Serialize};

use crate::error::MomcorrError;
use crate::Result;

/// Column-named table of floating point values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers, in file order
    pub headers: Vec<String>,
    /// Data rows; each row has exactly `headers.len()` values
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// Create an empty table with the given headers.
    ///
    /// Fails if two headers share a name.
    pub fn new<I, S>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        for (i, name) in headers.iter().enumerate() {
            if headers[..i].contains(name) {
                return Err(MomcorrError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Append a row, checking its arity against the headers.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(MomcorrError::RowArity {
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Copy of the named column's values.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Row at position `i`.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        self.rows.get(i).map(Vec::as_slice)
    }
}
