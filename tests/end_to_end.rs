use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::{NamedTempFile, TempDir};

use ols_bench::bench::{Benchmark, FailurePolicy};
use ols_bench::config::Config;
use ols_bench::data::loader::{load_csv, LoaderOptions};
use ols_bench::regression::{self, FitError};

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn config_for(path: &Path, sizes: Vec<usize>, iterations: usize) -> Config {
    Config {
        source_path: path.to_path_buf(),
        sample_sizes: sizes,
        iterations_per_size: iterations,
        ..Config::default()
    }
}

#[test]
fn exact_line_single_trial() {
    let file = csv_file("x,y\n1,2\n2,4\n3,6\n4,8\n");
    let config = config_for(file.path(), vec![4], 1);

    let dataset = load_csv(&config.source_path, &config.loader())
        .unwrap()
        .dataset;
    let rows = Benchmark::new(config.bench())
        .run(&dataset, &mut io::sink())
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = rows[0];
    assert_eq!(row.sample_size, 4);
    assert!(row.mean_intercept.abs() < 1e-9);
    assert!((row.mean_slope - 2.0).abs() < 1e-9);
    assert!(row.mean_mse.abs() < 1e-9);
}

#[test]
fn unparsable_row_is_dropped() {
    let file = csv_file("1,2\nabc,def\n2,4\n3,6\n");
    let loaded = load_csv(file.path(), &LoaderOptions::default()).unwrap();
    assert_eq!(loaded.dataset.len(), 3);
    assert_eq!(loaded.stats.rows_dropped, 1);
}

#[test]
fn valid_rows_survive_interspersed_garbage() {
    let mut contents = String::from("x,y\n");
    for i in 0..50 {
        contents.push_str(&format!("{i},{}\n", 2 * i + 1));
        if i % 5 == 0 {
            contents.push_str("oops\n1,2,3\n,\n");
        }
    }
    let file = csv_file(&contents);
    let loaded = load_csv(file.path(), &LoaderOptions::default()).unwrap();
    assert_eq!(loaded.dataset.len(), 50);
    assert_eq!(loaded.stats.rows_dropped, 1 + 10 * 3);
}

#[test]
fn constant_predictor_is_reported_as_degenerate() {
    let file = csv_file("5,1\n5,2\n5,3\n5,4\n");
    let config = config_for(file.path(), vec![4], 1);
    let dataset = load_csv(file.path(), &config.loader()).unwrap().dataset;

    let err = Benchmark::new(config.bench())
        .run(&dataset, &mut io::sink())
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<FitError>(),
        Some(&FitError::ZeroVariance { value: 5.0 })
    );
    assert!(format!("{err:#}").contains("sample size 4"));
}

#[test]
fn skip_policy_keeps_remaining_sizes() {
    let file = csv_file("1,1\n2,3\n3,5\n4,7\n5,9\n");
    let mut config = config_for(file.path(), vec![1, 5], 2);
    config.failure_policy = FailurePolicy::Skip;
    let dataset = load_csv(file.path(), &config.loader()).unwrap().dataset;

    let rows = Benchmark::new(config.bench())
        .run(&dataset, &mut io::sink())
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sample_size, 5);
    assert!((rows[0].mean_slope - 2.0).abs() < 1e-9);
}

#[test]
fn oversized_request_uses_every_row() {
    let file = csv_file("0,1\n1,3\n2,5\n");
    let config = config_for(file.path(), vec![1_000], 1);
    let dataset = load_csv(file.path(), &config.loader()).unwrap().dataset;

    let mut out: Vec<u8> = Vec::new();
    let rows = Benchmark::new(config.bench()).run(&dataset, &mut out).unwrap();
    assert_eq!(rows[0].sample_size, 1_000);
    assert!((rows[0].mean_intercept - 1.0).abs() < 1e-9);
    assert!(String::from_utf8(out)
        .unwrap()
        .contains("--- Testing with 1000 points ---"));
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_csv(&dir.path().join("absent.csv"), &LoaderOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn config_file_drives_the_run() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("line.tsv");
    fs::write(&data, "x\ty\n0\t2\n1\t5.5\n2\t9\n3\t12.5\n").unwrap();
    let config_path = dir.path().join("bench.toml");
    fs::write(
        &config_path,
        format!(
            "source_path = {:?}\nsample_sizes = [3, 4]\niterations_per_size = 2\ndelimiter = \"\\t\"\n",
            data.to_str().unwrap()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    config.validate().unwrap();
    let dataset = load_csv(&config.source_path, &config.loader())
        .unwrap()
        .dataset;
    assert_eq!(dataset.len(), 4);

    let rows = Benchmark::new(config.bench())
        .run(&dataset, &mut io::sink())
        .unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert!((row.mean_intercept - 2.0).abs() < 1e-9);
        assert!((row.mean_slope - 3.5).abs() < 1e-9);
    }
}

#[test]
fn generated_sample_recovers_true_line() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("dados.csv");
    let status = Command::new(env!("CARGO_BIN_EXE_generate_sample"))
        .arg(&output)
        .arg("1000")
        .status()
        .expect("run generate_sample");
    assert!(status.success());

    let loaded = load_csv(&output, &LoaderOptions::default()).unwrap();
    assert_eq!(loaded.dataset.len(), 1000);
    assert_eq!(loaded.stats.rows_dropped, 1);

    let line = regression::fit(&loaded.dataset.x, &loaded.dataset.y).unwrap();
    assert!((line.intercept - 2.0).abs() < 1e-5);
    assert!((line.slope - 3.5).abs() < 1e-6);
}

fn run_bench(args: &[&OsStr], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ols-bench"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run ols-bench");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for ols-bench")
}

#[test]
fn binary_prints_summary_table() {
    let file = csv_file("x,y\n1,2\n2,4\n3,6\n4,8\n");
    let output = run_bench(
        &[
            OsStr::new("--file"),
            file.path().as_os_str(),
            OsStr::new("--sizes"),
            OsStr::new("4"),
            OsStr::new("--iterations"),
            OsStr::new("1"),
        ],
        "",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("N\tA\tB\tMSE\tTime(s)\n"));
    assert!(stdout
        .lines()
        .any(|l| l.starts_with("4\t0.000000\t2.000000\t0.00000000\t")));
}

#[test]
fn binary_exits_non_zero_on_degenerate_size() {
    let file = csv_file("5,1\n5,2\n5,3\n5,4\n");
    let output = run_bench(
        &[
            OsStr::new("--file"),
            file.path().as_os_str(),
            OsStr::new("--sizes"),
            OsStr::new("4"),
            OsStr::new("--iterations"),
            OsStr::new("1"),
        ],
        "",
    );
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Time(s)"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("sample size 4"));
}

#[test]
fn binary_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("line.csv");
    fs::write(&data, "x;y\n0;1\n1;3\n2;5\n3;7\n").unwrap();
    let config_path = dir.path().join("bench.toml");
    fs::write(
        &config_path,
        format!(
            "source_path = {:?}\nsample_sizes = [2, 3]\niterations_per_size = 1\n",
            data.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = run_bench(
        &[
            OsStr::new("--config"),
            config_path.as_os_str(),
            OsStr::new("--sizes"),
            OsStr::new("4"),
            OsStr::new("--delimiter"),
            OsStr::new(";"),
            OsStr::new("--predict"),
        ],
        "3\nq\n",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let table: Vec<&str> = stdout
        .lines()
        .skip_while(|l| *l != "N\tA\tB\tMSE\tTime(s)")
        .skip(1)
        .take_while(|l| !l.is_empty())
        .collect();
    assert_eq!(table.len(), 1);
    assert!(table[0].starts_with("4\t1.000000\t2.000000\t"));
    assert!(stdout.contains("-> y = 7.000000"));
}
