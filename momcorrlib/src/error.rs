//! Error types for momcorrlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading tables or extracting correlation functions
#[derive(Error, Debug)]
pub enum MomcorrError {
    /// Failed to read a file
    #[error("failed to read file '{}'", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A data line could not be parsed
    #[error("{origin}:{line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },

    /// The input contained no header line
    #[error("{0}: no header line found")]
    EmptyTable(String),

    /// Two columns share a header name
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// A row was pushed with the wrong number of cells
    #[error("row has {found} values but the table has {expected} columns")]
    RowArity { expected: usize, found: usize },

    /// A required column is absent
    #[error("column '{0}' not found")]
    MissingColumn(String),

    /// No row carries the requested inverse temperature
    #[error("beta = {beta} not found in data (available: {})", format_betas(.available))]
    BetaNotFound { beta: f64, available: Vec<f64> },

    /// More than one row carries the requested inverse temperature
    #[error("beta = {beta} matches {rows} rows; expected exactly one")]
    AmbiguousBeta { beta: f64, rows: usize },

    /// No momentum distribution or structure factor columns in the data
    #[error("no {0} columns found")]
    NoCorrelationColumns(String),

    /// Extraction failed for a particular input file
    #[error("{}", path.display())]
    Extract {
        path: PathBuf,
        source: Box<MomcorrError>,
    },

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_betas(betas: &[f64]) -> String {
    if betas.is_empty() {
        return "none".to_string();
    }
    betas
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
