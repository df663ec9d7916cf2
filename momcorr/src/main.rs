//! # momcorr
//!
//! Print the momentum-space correlation function at a given inverse
//! temperature from analysed DMQMC data.
//!
//! ## Usage
//!
//! ```bash
//! # Momentum distribution at beta = 2
//! momcorr -b 2.0 analysed.dat
//!
//! # Structure factor, as JSON
//! momcorr -b 2.0 --estimator structure --output json analysed.dat
//!
//! # Several calculations at once, one block per file
//! momcorr --beta-val 0.5 run1.dat run2.dat
//! ```
//!
//! The input is the whitespace-delimited table written by the
//! finite-temperature analysis. Momentum-resolved estimates are the
//! `n_<k>` / `S_<k>` columns and their `_error` partners.

mod render;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::EnumValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, LevelFilter};
use momcorrlib::{
    extract_files, Estimator, ExtractOptions, FormatOptions, MomentumCorrelation,
    DEFAULT_BETA_COLUMN,
};

use render::{render_reports, OutputFormat};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("momcorr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract the momentum space correlation functions from analysed DMQMC data")
        .arg(
            Arg::new("beta")
                .short('b')
                .long("beta-val")
                .value_name("BETA")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Inverse temperature to extract the momentum distribution at"),
        )
        .arg(
            Arg::new("filename")
                .value_name("FILENAME")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help(
                    "Analysed DMQMC data, i.e. the output of the finite-temperature \
                     analysis of a DMQMC calculation",
                ),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(EnumValueParser::<OutputFormat>::new())
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("estimator")
                .short('e')
                .long("estimator")
                .value_parser(["auto", "momentum", "structure"])
                .default_value("auto")
                .help("Correlation function to extract (momentum: n_k, structure: S_k)"),
        )
        .arg(
            Arg::new("beta-column")
                .long("beta-column")
                .default_value(DEFAULT_BETA_COLUMN)
                .help("Header of the inverse temperature column"),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .allow_negative_numbers(true)
                .value_parser(parse_tolerance)
                .help("Relative tolerance when matching the inverse temperature"),
        )
        .arg(
            Arg::new("precision")
                .short('p')
                .long("precision")
                .value_parser(value_parser!(usize))
                .help("Print values with a fixed number of decimals"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v, -vv, -vvv)"),
        )
}

/// Tolerances must be finite and non-negative, otherwise nothing can match
fn parse_tolerance(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("must be a finite, non-negative number (got {s})"))
    }
}

/// Set up env_logger on stderr; RUST_LOG takes precedence over -v
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Build extraction options from matches
fn extract_options(matches: &ArgMatches) -> Result<ExtractOptions> {
    let mut options = ExtractOptions::new();

    if let Some(name) = matches.get_one::<String>("beta-column") {
        options = options.beta_column(name);
    }
    if let Some(&tolerance) = matches.get_one::<f64>("tolerance") {
        options = options.tolerance(tolerance);
    }
    if let Some(estimator) = matches.get_one::<String>("estimator") {
        let estimator: Estimator = estimator.parse().map_err(anyhow::Error::msg)?;
        options = options.estimator(estimator);
    }

    Ok(options)
}

fn run(matches: &ArgMatches, filenames: &[PathBuf]) -> Result<()> {
    let beta = *matches
        .get_one::<f64>("beta")
        .context("--beta-val is required")?;
    let format = matches
        .get_one::<OutputFormat>("output")
        .copied()
        .unwrap_or_default();
    let format_options =
        FormatOptions::new().precision(matches.get_one::<usize>("precision").copied());

    let extractor = MomentumCorrelation::new(extract_options(matches)?);
    debug!("extracting at beta = {} with {:?}", beta, extractor.options());

    let reports = extract_files(filenames, beta, &extractor)?;

    let styled = console::Term::stdout().features().colors_supported();
    let output = render_reports(&reports, format, &format_options, styled)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|_| stdout.flush())
        .context("writing output")?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    let filenames: Vec<PathBuf> = matches
        .get_many::<PathBuf>("filename")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if filenames.is_empty() {
        // Help goes to stdout; exit status distinguishes this from parser errors.
        if build_command().print_help().is_ok() {
            println!();
        }
        return ExitCode::FAILURE;
    }

    match run(&matches, &filenames) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
