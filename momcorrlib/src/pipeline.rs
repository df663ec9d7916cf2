//! Load-then-extract pipeline over one or more analysed files.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::error::MomcorrError;
use crate::extract::CorrelationExtractor;
use crate::loader::read_table;
use crate::table::Table;
use crate::Result;

/// Correlation function extracted from a single input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// File the data was read from
    pub source: PathBuf,
    /// Inverse temperature that was extracted
    pub beta: f64,
    /// The extracted table
    #[serde(flatten)]
    pub table: Table,
}

/// Read `path` and extract the correlation function at `beta`.
///
/// Extractor failures are wrapped in [`MomcorrError::Extract`] so they name
/// the file; read and parse errors already do.
pub fn extract_file<E>(path: impl AsRef<Path>, beta: f64, extractor: &E) -> Result<Report>
where
    E: CorrelationExtractor + ?Sized,
{
    let path = path.as_ref();
    let data = read_table(path)?;
    let table = extractor
        .extract(&data, beta)
        .map_err(|e| MomcorrError::Extract {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
    info!(
        "{}: extracted {} k-points at beta = {}",
        path.display(),
        table.len(),
        beta
    );
    Ok(Report {
        source: path.to_path_buf(),
        beta,
        table,
    })
}

/// Run [`extract_file`] over every path in order, stopping at the first failure.
pub fn extract_files<P, E>(paths: &[P], beta: f64, extractor: &E) -> Result<Vec<Report>>
where
    P: AsRef<Path>,
    E: CorrelationExtractor + ?Sized,
{
    paths
        .iter()
        .map(|path| extract_file(path, beta, extractor))
        .collect()
}
