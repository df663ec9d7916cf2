//! Extraction of momentum-space correlation functions.
//!
//! The analysed DMQMC output holds one row per inverse temperature. Each
//! momentum-resolved estimate occupies a column named `<prefix>_<k>` with its
//! standard error in `<prefix>_<k>_error`, where `<prefix>` is `n` for the
//! momentum distribution and `S` for the static structure factor.
//!
//! Extraction picks the row at the requested beta and pivots those columns
//! into a `k | <prefix>_k | <prefix>_k_error` table ordered by `k`.

use log::{debug, trace};

use crate::error::MomcorrError;
use crate::options::{Estimator, ExtractOptions};
use crate::table::Table;
use crate::Result;

const ERROR_SUFFIX: &str = "_error";

/// Turns an analysed data table into a correlation function at fixed beta.
///
/// The pipeline only depends on this trait, so alternative analyses (or
/// test stubs) can be swapped in.
pub trait CorrelationExtractor {
    /// Extract the correlation function at inverse temperature `beta`.
    fn extract(&self, data: &Table, beta: f64) -> Result<Table>;
}

impl<T: CorrelationExtractor + ?Sized> CorrelationExtractor for &T {
    fn extract(&self, data: &Table, beta: f64) -> Result<Table> {
        (**self).extract(data, beta)
    }
}

/// Default extractor for momentum distributions and structure factors.
#[derive(Debug, Clone, Default)]
pub struct MomentumCorrelation {
    options: ExtractOptions,
}

/// A momentum-resolved column and its optional error partner.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CorrelationColumn {
    k: f64,
    value: usize,
    error: Option<usize>,
}

impl MomentumCorrelation {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Find the single row whose beta matches.
    fn select_row<'a>(&self, data: &'a Table, beta: f64) -> Result<&'a [f64]> {
        let beta_idx = data
            .column_index(&self.options.beta_column)
            .ok_or_else(|| MomcorrError::MissingColumn(self.options.beta_column.clone()))?;

        let matches: Vec<&[f64]> = data
            .rows
            .iter()
            .filter(|row| self.options.beta_matches(row[beta_idx], beta))
            .map(Vec::as_slice)
            .collect();

        match matches.as_slice() {
            [row] => Ok(*row),
            [] => {
                let mut available: Vec<f64> = Vec::new();
                for row in &data.rows {
                    if !available.contains(&row[beta_idx]) {
                        available.push(row[beta_idx]);
                    }
                }
                Err(MomcorrError::BetaNotFound { beta, available })
            }
            many => Err(MomcorrError::AmbiguousBeta {
                beta,
                rows: many.len(),
            }),
        }
    }

    /// Resolve `Auto` against the columns actually present.
    fn resolve_prefix(&self, headers: &[String]) -> Result<&'static str> {
        if let Some(prefix) = self.options.estimator.prefix() {
            return Ok(prefix);
        }
        for estimator in [Estimator::MomentumDistribution, Estimator::StructureFactor] {
            let prefix = estimator.prefix().unwrap_or_default();
            if !correlation_columns(headers, prefix).is_empty() {
                debug!("auto-selected {}", estimator.describe());
                return Ok(prefix);
            }
        }
        Err(MomcorrError::NoCorrelationColumns(
            Estimator::Auto.describe().to_string(),
        ))
    }
}

impl CorrelationExtractor for MomentumCorrelation {
    fn extract(&self, data: &Table, beta: f64) -> Result<Table> {
        let prefix = self.resolve_prefix(&data.headers)?;
        let mut columns = correlation_columns(&data.headers, prefix);
        if columns.is_empty() {
            return Err(MomcorrError::NoCorrelationColumns(
                self.options.estimator.describe().to_string(),
            ));
        }
        columns.sort_by(|a, b| a.k.total_cmp(&b.k));

        let row = self.select_row(data, beta)?;
        let with_errors = columns.iter().all(|c| c.error.is_some());
        if !with_errors {
            debug!("some {prefix}_<k> columns lack an error column; omitting {prefix}_k_error");
        }

        let value_header = format!("{prefix}_k");
        let mut headers = vec!["k".to_string(), value_header.clone()];
        if with_errors {
            headers.push(format!("{value_header}{ERROR_SUFFIX}"));
        }

        let mut out = Table::new(headers)?;
        for column in &columns {
            let mut values = vec![column.k, row[column.value]];
            if let (true, Some(err)) = (with_errors, column.error) {
                values.push(row[err]);
            }
            trace!("k = {} -> {:?}", column.k, values);
            out.push_row(values)?;
        }
        Ok(out)
    }
}

/// Collect `<prefix>_<k>` columns, pairing each with `<prefix>_<k>_error`.
fn correlation_columns(headers: &[String], prefix: &str) -> Vec<CorrelationColumn> {
    let stem = format!("{prefix}_");
    headers
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let label = name.strip_prefix(&stem)?;
            if label.ends_with(ERROR_SUFFIX) {
                return None;
            }
            let k = label.parse::<f64>().ok().filter(|k| k.is_finite())?;
            let error_name = format!("{name}{ERROR_SUFFIX}");
            Some(CorrelationColumn {
                k,
                value: idx,
                error: headers.iter().position(|h| *h == error_name),
            })
        })
        .collect()
}
