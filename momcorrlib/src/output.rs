//! Plain-text rendering of tables.
//!
//! Layout follows the familiar dataframe `to_string(index=False)` form:
//! every column is right-aligned to its widest entry (header included),
//! columns are separated by a single space and there is no row index.

use crate::options::FormatOptions;
use crate::table::Table;

/// Render a table as aligned text, one newline-terminated line per row.
///
/// An empty table renders as its header line alone.
pub fn format_table(table: &Table, options: &FormatOptions) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| format_value(v, options.precision))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cells
                .iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    push_line(&mut output, &table.headers, &widths);
    for row in &cells {
        push_line(&mut output, row, &widths);
    }
    output
}

/// Magnitudes printed in plain decimal notation; anything outside uses an exponent.
const PLAIN_RANGE: std::ops::Range<f64> = 1e-4..1e16;

/// Format a single value.
///
/// Without a precision the shortest decimal that round-trips is used.
/// Non-zero values outside [`PLAIN_RANGE`] are written in exponent form.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let exponent = value != 0.0 && !PLAIN_RANGE.contains(&value.abs());
    match (precision, exponent) {
        (Some(p), true) => format!("{:.*e}", p, value),
        (Some(p), false) => format!("{:.*}", p, value),
        (None, true) => format!("{:e}", value),
        (None, false) => value.to_string(),
    }
}

fn push_line<S: AsRef<str>>(output: &mut String, cells: &[S], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:>width$}", cell.as_ref(), width = width))
        .collect::<Vec<_>>()
        .join(" ");
    output.push_str(&line);
    output.push('\n');
}
