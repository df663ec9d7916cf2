//! Output rendering for extracted reports

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use console::Style;
use momcorrlib::{format_table, format_value, FormatOptions, Report};

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text with a header line
    #[default]
    Table,
    /// Array of report objects
    Json,
    /// Comma separated values
    Csv,
}

/// Render all reports in the requested format.
///
/// `styled` bolds table headers; only pass `true` when writing to a terminal.
pub fn render_reports(
    reports: &[Report],
    format: OutputFormat,
    options: &FormatOptions,
    styled: bool,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(reports, options, styled)),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Csv => render_csv(reports, options),
    }
}

/// One block per report; blocks are titled only when there is more than one.
fn render_table(reports: &[Report], options: &FormatOptions, styled: bool) -> String {
    let titled = reports.len() > 1;
    let header_style = Style::new().bold().force_styling(true);

    let blocks: Vec<String> = reports
        .iter()
        .map(|report| {
            let mut text = format_table(&report.table, options);
            if styled {
                if let Some((header, body)) = text.split_once('\n') {
                    text = format!("{}\n{}", header_style.apply_to(header), body);
                }
            }
            if titled {
                format!("# {}\n{}", report.source.display(), text)
            } else {
                text
            }
        })
        .collect();

    blocks.join("\n")
}

/// JSON has no NaN or infinity, so such cells are refused rather than written as `null`.
fn render_json(reports: &[Report]) -> Result<String> {
    for report in reports {
        let table = &report.table;
        for row in &table.rows {
            if let Some((col, value)) = row.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                bail!(
                    "{}: column '{}' holds {}, which JSON cannot represent; use --output table or csv",
                    report.source.display(),
                    table.headers[col],
                    format_value(*value, None)
                );
            }
        }
    }

    let mut json = serde_json::to_string_pretty(reports).context("serializing reports")?;
    json.push('\n');
    Ok(json)
}

fn render_csv(reports: &[Report], options: &FormatOptions) -> Result<String> {
    let with_source = reports.len() > 1;
    let mut writer = csv::Writer::from_writer(Vec::new());

    if let Some(first) = reports.first() {
        if let Some(other) = reports[1..]
            .iter()
            .find(|r| r.table.headers != first.table.headers)
        {
            bail!(
                "cannot combine into one CSV: {} has columns [{}] but {} has columns [{}]",
                first.source.display(),
                first.table.headers.join(", "),
                other.source.display(),
                other.table.headers.join(", ")
            );
        }

        let mut header: Vec<&str> = Vec::new();
        if with_source {
            header.push("source");
        }
        header.extend(first.table.headers.iter().map(String::as_str));
        writer.write_record(&header)?;
    }

    for report in reports {
        let source = report.source.display().to_string();
        for row in &report.table.rows {
            let mut record: Vec<String> = Vec::with_capacity(row.len() + 1);
            if with_source {
                record.push(source.clone());
            }
            record.extend(row.iter().map(|&v| format_value(v, options.precision)));
            writer.write_record(&record)?;
        }
    }

    let bytes = writer.into_inner().context("flushing CSV output")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}
