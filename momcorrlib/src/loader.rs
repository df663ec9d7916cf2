//! Reading whitespace-delimited tables.
//!
//! The analysis step writes its estimates as a plain text table: one header
//! line followed by rows of numbers, with columns separated by any run of
//! spaces or tabs. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::MomcorrError;
use crate::table::Table;
use crate::Result;

/// Read a table from a file on disk.
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MomcorrError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(BufReader::new(file), &path.display().to_string())?;
    debug!(
        "read {} rows x {} columns from {}",
        table.len(),
        table.width(),
        path.display()
    );
    Ok(table)
}

/// Parse a table from any buffered reader.
///
/// `origin` names the source in error messages (usually the file path).
pub fn parse_table<R: BufRead>(reader: R, origin: &str) -> Result<Table> {
    let mut lines = reader.lines().enumerate();

    let mut table = loop {
        let Some((idx, line)) = lines.next() else {
            return Err(MomcorrError::EmptyTable(origin.to_string()));
        };
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if !fields.is_empty() {
            break Table::new(fields).map_err(|e| parse_error(origin, idx + 1, e))?;
        }
    };

    for (idx, line) in lines {
        let line = line?;
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        if fields.len() != table.width() {
            return Err(MomcorrError::Parse {
                origin: origin.to_string(),
                line: line_no,
                message: format!(
                    "expected {} fields, found {}",
                    table.width(),
                    fields.len()
                ),
            });
        }

        let row = fields
            .iter()
            .zip(&table.headers)
            .map(|(field, header)| {
                field.parse::<f64>().map_err(|_| MomcorrError::Parse {
                    origin: origin.to_string(),
                    line: line_no,
                    message: format!("column '{}': '{}' is not a number", header, field),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        table.push_row(row)?;
    }

    Ok(table)
}

fn parse_error(origin: &str, line: usize, err: MomcorrError) -> MomcorrError {
    MomcorrError::Parse {
        origin: origin.to_string(),
        line,
        message: err.to_string(),
    }
}
