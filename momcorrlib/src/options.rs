//! Input options for extraction and formatting.
//!
//! This module contains all configuration types that control what data
//! the library selects and how it is presented.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default header of the inverse temperature column.
pub const DEFAULT_BETA_COLUMN: &str = "Beta";

/// Default relative tolerance when matching beta values.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Which correlation function to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Estimator {
    /// Momentum distribution if present, otherwise structure factor
    #[default]
    Auto,
    /// Momentum distribution, columns `n_<k>`
    MomentumDistribution,
    /// Static structure factor, columns `S_<k>`
    StructureFactor,
}

impl Estimator {
    /// Column prefix used by the analysis output, or `None` for `Auto`.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Estimator::Auto => None,
            Estimator::MomentumDistribution => Some("n"),
            Estimator::StructureFactor => Some("S"),
        }
    }

    /// Human readable name, used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Estimator::Auto => "momentum distribution or structure factor",
            Estimator::MomentumDistribution => "momentum distribution",
            Estimator::StructureFactor => "structure factor",
        }
    }
}

impl FromStr for Estimator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Estimator::Auto),
            "momentum" | "n" | "n_k" => Ok(Estimator::MomentumDistribution),
            "structure" | "s" | "s_k" => Ok(Estimator::StructureFactor),
            _ => Err(format!("Unknown estimator: {}", s)),
        }
    }
}

/// Options for extracting a correlation function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Header of the inverse temperature column
    pub beta_column: String,
    /// Relative tolerance for matching beta
    pub tolerance: f64,
    /// Which correlation function to extract
    pub estimator: Estimator,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            beta_column: DEFAULT_BETA_COLUMN.to_string(),
            tolerance: DEFAULT_TOLERANCE,
            estimator: Estimator::Auto,
        }
    }
}

impl ExtractOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inverse temperature column header.
    pub fn beta_column(mut self, name: impl Into<String>) -> Self {
        self.beta_column = name.into();
        self
    }

    /// Set the relative beta tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the estimator.
    pub fn estimator(mut self, estimator: Estimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// True if `value` matches `beta` within the configured tolerance.
    pub fn beta_matches(&self, value: f64, beta: f64) -> bool {
        (value - beta).abs() <= self.tolerance * beta.abs().max(1.0)
    }
}

/// Options for rendering a table as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Fixed number of decimals; `None` prints the shortest exact form
    pub precision: Option<usize>,
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set fixed precision
    pub fn precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }
}
