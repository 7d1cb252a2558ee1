#![cfg(feature = "cli")]

use std::{
    io::Write,
    process::{Command, Stdio},
    str,
};

use serde_json::Value;
use tempfile::NamedTempFile;

const DATASET: &str = "\
date,open,high,low,close,volume,Name
2016-03-01,10,11,9,10.5,100,ABC
2016-03-02,10,11,9,10.7,200,ABC
2016-03-01,20,21,19,20.5,300,XYZ
";

fn run(args: &[&str], stdin: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stock-charts"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("STOCK_CHARTS_DATASET")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn dashboard_streams_charts_for_events() {
    let mut data = NamedTempFile::new().unwrap();
    data.write_all(DATASET.as_bytes()).unwrap();
    let path = data.path().to_str().unwrap();

    let output = run(
        &["dashboard", "--data", path, "--symbol", "XYZ"],
        "{\"event\":\"select_entity\",\"entity\":\"ABC\"}\n",
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        str::from_utf8(&output.stderr).unwrap()
    );

    let lines: Vec<Value> = str::from_utf8(&output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["figure"]["data"][0]["name"], "XYZ");
    assert_eq!(lines[2]["chart_id"], "price-chart");
    assert_eq!(lines[2]["figure"]["data"][0]["y"], serde_json::json!([10.5, 10.7]));
}

#[test]
fn compare_over_dataset_prints_final_chart() {
    let mut data = NamedTempFile::new().unwrap();
    data.write_all(DATASET.as_bytes()).unwrap();
    let path = data.path().to_str().unwrap();

    let output = run(
        &[
            "compare", "--source", "dataset", "--data", path, "--start", "2016-01-01", "--end",
            "2016-12-31",
        ],
        "ABC\nfinish\n",
    );
    assert!(output.status.success());

    let stdout = str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("Final Stock Comparison"));
    assert!(stdout.contains("ABC: 2 points"));
}

#[test]
fn missing_dataset_fails_at_startup() {
    let output = run(&["dashboard", "--data", "/no/such/file.csv"], "");
    assert!(!output.status.success());
    assert!(str::from_utf8(&output.stderr).unwrap().contains("/no/such/file.csv"));
}
