//! Integration tests for the momcorr CLI

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{tempdir, TempDir};

const ANALYSED: &str = "\
 Beta  Tr[Hp]/Tr[p]  Tr[Hp]/Tr[p]_error  n_2  n_2_error  n_1  n_1_error
  0.5  -1.25  0.01  0.40  0.04  0.75  0.02
  1.0  -2.50  0.02  0.35  0.05  0.80  0.03
";

const STRUCTURE: &str = "\
Beta S_1 S_1_error S_3 S_3_error
2.0 0.9 0.1 1.1 0.2
";

fn run_momcorr(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_momcorr"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn fixture(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analysed.dat");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let (stdout, _, code) = run_momcorr(&["--help"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("--beta-val"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--estimator"));
    assert!(stdout.contains("FILENAME"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, code) = run_momcorr(&["--version"]);

    assert_eq!(code, 0);
    assert!(stdout.contains("momcorr"));
}

#[test]
fn test_extracts_table_at_beta() {
    let (_dir, path) = fixture(ANALYSED);
    let (stdout, stderr, code) = run_momcorr(&["-b", "1.0", path_str(&path)]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert_eq!(stdout, "k  n_k n_k_error\n1  0.8      0.03\n2 0.35      0.05\n");
}

#[test]
fn test_long_flag_and_precision() {
    let (_dir, path) = fixture(ANALYSED);
    let (stdout, _, code) = run_momcorr(&["--beta-val", "0.5", "-p", "2", path_str(&path)]);

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "   k  n_k n_k_error\n1.00 0.75      0.02\n2.00 0.40      0.04\n"
    );
}

#[test]
fn test_structure_factor_json() {
    let (_dir, path) = fixture(STRUCTURE);
    let (stdout, _, code) = run_momcorr(&["-b", "2", "--output", "json", path_str(&path)]);

    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed[0]["headers"][1], "S_k");
    assert_eq!(parsed[0]["rows"][1][0], 3.0);
    assert_eq!(parsed[0]["beta"], 2.0);
}

#[test]
fn test_csv_output() {
    let (_dir, path) = fixture(ANALYSED);
    let (stdout, _, code) = run_momcorr(&["-b", "0.5", "-o", "csv", path_str(&path)]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "k,n_k,n_k_error\n1,0.75,0.02\n2,0.4,0.04\n");
}

#[test]
fn test_missing_filename_prints_usage() {
    let (stdout, _, code) = run_momcorr(&["-b", "1.0"]);

    assert_eq!(code, 1);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--beta-val"));
}

#[test]
fn test_missing_beta_is_parser_error() {
    let (_dir, path) = fixture(ANALYSED);
    let (_, stderr, code) = run_momcorr(&[path_str(&path)]);

    assert_eq!(code, 2);
    assert!(stderr.contains("--beta-val"));
}

#[test]
fn test_non_numeric_beta_is_parser_error() {
    let (_dir, path) = fixture(ANALYSED);
    let (_, stderr, code) = run_momcorr(&["-b", "hot", path_str(&path)]);

    assert_eq!(code, 2);
    assert!(stderr.contains("hot"));
}

#[test]
fn test_nonexistent_file() {
    let (stdout, stderr, code) = run_momcorr(&["-b", "1.0", "/nonexistent/analysed.dat"]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("failed to read file"));
    assert_eq!(stderr.matches("/nonexistent/analysed.dat").count(), 1);
}

#[test]
fn test_beta_not_in_data() {
    let (_dir, path) = fixture(ANALYSED);
    let (stdout, stderr, code) = run_momcorr(&["-b", "3.0", path_str(&path)]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.starts_with(&format!("Error: {}: beta = 3 not found", path.display())));
}

#[test]
fn test_malformed_table() {
    let (_dir, path) = fixture("Beta n_1\n1.0 0.5 0.1\n");
    let (_, stderr, code) = run_momcorr(&["-b", "1.0", path_str(&path)]);

    assert_eq!(code, 1);
    assert!(stderr.starts_with("Error:"));
    assert!(stderr.contains("expected 2 fields, found 3"));
}

#[test]
fn test_every_file_is_processed() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.dat");
    let second = dir.path().join("second.dat");
    fs::write(&first, ANALYSED).unwrap();
    fs::write(&second, ANALYSED.replace("0.80", "0.90")).unwrap();

    let (stdout, _, code) = run_momcorr(&["-b", "1.0", path_str(&first), path_str(&second)]);

    assert_eq!(code, 0);
    assert!(stdout.starts_with(&format!("# {}\n", first.display())));
    assert!(stdout.contains(&format!("\n\n# {}\n", second.display())));
    assert!(stdout.contains(" 0.8 "));
    assert!(stdout.contains(" 0.9 "));
}

#[test]
fn test_extra_missing_file_is_an_error() {
    let (dir, path) = fixture(ANALYSED);
    let missing = dir.path().join("missing.dat");

    let (stdout, stderr, code) = run_momcorr(&["-b", "1.0", path_str(&path), path_str(&missing)]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("missing.dat"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let (_dir, path) = fixture(ANALYSED);
    let (quiet, _, _) = run_momcorr(&["-b", "1.0", path_str(&path)]);
    let (loud, stderr, code) = run_momcorr(&["-vv", "-b", "1.0", path_str(&path)]);

    assert_eq!(code, 0);
    assert_eq!(quiet, loud);
    assert!(stderr.contains("extracted 2 k-points"));
}

fn two_files(first: &str, second: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.dat");
    let b = dir.path().join("b.dat");
    fs::write(&a, first).unwrap();
    fs::write(&b, second).unwrap();
    (dir, a, b)
}

#[test]
fn test_csv_rejects_mixed_estimators() {
    let (_dir, a, b) = two_files("Beta n_1 n_1_error\n1 0.5 0.1\n", "Beta S_1 S_1_error\n1 0.9 0.2\n");
    let (stdout, stderr, code) = run_momcorr(&["-b", "1", "-o", "csv", path_str(&a), path_str(&b)]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("Error: cannot combine into one CSV"));
    assert!(stderr.contains("[k, n_k, n_k_error]"));
    assert!(stderr.contains("[k, S_k, S_k_error]"));
}

#[test]
fn test_csv_rejects_mismatched_error_columns() {
    let (_dir, a, b) = two_files("Beta n_1 n_1_error\n1 0.5 0.1\n", "Beta n_1\n1 0.6\n");
    let (stdout, stderr, code) = run_momcorr(&["-b", "1", "-o", "csv", path_str(&a), path_str(&b)]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("b.dat has columns [k, n_k]"));
    assert!(!stderr.contains("previous record"));
}

#[test]
fn test_table_output_allows_mixed_estimators() {
    let (_dir, a, b) = two_files("Beta n_1 n_1_error\n1 0.5 0.1\n", "Beta S_1 S_1_error\n1 0.9 0.2\n");
    let (stdout, _, code) = run_momcorr(&["-b", "1", path_str(&a), path_str(&b)]);

    assert_eq!(code, 0);
    assert!(stdout.contains("k n_k n_k_error"));
    assert!(stdout.contains("k S_k S_k_error"));
}

#[test]
fn test_invalid_tolerance_is_parser_error() {
    let (_dir, path) = fixture(ANALYSED);
    for bad in ["--tolerance=-1e-6", "--tolerance=NaN", "--tolerance=inf"] {
        let (stdout, stderr, code) = run_momcorr(&["-b", "1.0", bad, path_str(&path)]);

        assert_eq!(code, 2, "{bad}");
        assert!(stdout.is_empty());
        assert!(stderr.contains("--tolerance"));
    }
}

#[test]
fn test_json_refuses_nan_cells() {
    let (_dir, path) = fixture("Beta n_1 n_1_error\n1 NaN 0.1\n");
    let (stdout, stderr, code) = run_momcorr(&["-b", "1", "-o", "json", path_str(&path)]);

    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("column 'n_k' holds NaN"));
}
