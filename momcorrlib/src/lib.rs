//! # momcorrlib
//!
//! Extract momentum-space correlation functions from analysed DMQMC data.
//!
//! ## Overview
//!
//! A DMQMC calculation, once run through the finite-temperature analysis,
//! yields a whitespace-delimited table with one row per inverse temperature
//! (`Beta`) and a column for every estimate. Momentum-resolved estimates
//! appear as `n_<k>` (momentum distribution) or `S_<k>` (static structure
//! factor) columns with matching `_error` columns.
//!
//! This library covers the four stages of pulling one of those functions
//! out at a fixed beta:
//!
//! - **Load**: [`read_table`] parses the analysed table
//! - **Extract**: a [`CorrelationExtractor`] picks the row and pivots the
//!   momentum columns; [`MomentumCorrelation`] is the stock implementation
//! - **Pipeline**: [`extract_files`] runs both over every input file
//! - **Format**: [`format_table`] renders the result as aligned text
//!
//! ## Example
//!
//! ```rust
//! use momcorrlib::{extract_file, format_table, FormatOptions, MomentumCorrelation};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let path = dir.path().join("analysed.dat");
//! fs::write(&path, "Beta n_1 n_1_error n_2 n_2_error\n1.0 0.5 0.1 0.25 0.05\n").unwrap();
//!
//! let report = extract_file(&path, 1.0, &MomentumCorrelation::default()).unwrap();
//! assert_eq!(report.table.headers, vec!["k", "n_k", "n_k_error"]);
//!
//! let text = format_table(&report.table, &FormatOptions::new());
//! assert!(text.starts_with("k  n_k n_k_error\n"));
//! ```

pub mod error;
pub mod extract;
pub mod loader;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod table;

pub use error::MomcorrError;
pub use extract::{CorrelationExtractor, MomentumCorrelation};
pub use loader::{parse_table, read_table};
pub use options::{
    Estimator, ExtractOptions, FormatOptions, DEFAULT_BETA_COLUMN, DEFAULT_TOLERANCE,
};
pub use output::{format_table, format_value};
pub use pipeline::{extract_file, extract_files, Report};
pub use table::Table;

/// Result type for momcorrlib operations
pub type Result<T> = std::result::Result<T, MomcorrError>;
