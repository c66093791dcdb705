use std::time::Duration;

use crate::scenario::Model;

use super::*;

fn default_args() -> Args {
    Args {
        scenario: Scenario::Fetch,
        count: 3,
        delay: Duration::from_millis(250).into(),
        json: false,
        quiet: false,
        log_dispatch: false,
        debug: false,
    }
}

fn sample_report(error: Option<String>) -> Report {
    Report {
        scenario: "fetch".to_string(),
        model: Model {
            count: 0,
            pending: 0,
            fetched: vec![1, 2, 3],
        },
        error,
    }
}

#[test]
fn prints_args() {
    print_args(&default_args());
}

#[test]
fn initializes_logger() {
    initialize_logger(&default_args()).unwrap();
}

#[test]
fn parses_cli_defaults() {
    let args = Args::parse_from(["r-loopcli"]);

    assert_eq!(args.scenario, Scenario::Fetch);
    assert_eq!(args.count, 3);
    assert_eq!(Duration::from(args.delay), Duration::from_millis(250));
    assert!(!args.json);
    assert!(!args.log_dispatch);
}

#[test]
fn parses_scenario_and_human_delay() {
    let args = Args::parse_from([
        "r-loopcli",
        "--scenario",
        "batch",
        "--count",
        "5",
        "--delay",
        "1s",
        "--log-dispatch",
    ]);

    assert_eq!(args.scenario, Scenario::Batch);
    assert_eq!(args.count, 5);
    assert_eq!(Duration::from(args.delay), Duration::from_secs(1));
    assert!(args.log_dispatch);
}

#[test]
fn prints_table_report() {
    print_report(&default_args(), &sample_report(None)).unwrap();
}

#[test]
fn prints_table_report_with_error() {
    let report = sample_report(Some("remote source refused".to_string()));
    print_report(&default_args(), &report).unwrap();
}

#[test]
fn prints_json_report() {
    let mut args = default_args();
    args.json = true;

    print_report(&args, &sample_report(None)).unwrap();
}

#[test]
fn report_serializes_model_and_error() {
    let report = sample_report(Some("boom".to_string()));

    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["scenario"], "fetch");
    assert_eq!(value["model"]["fetched"], serde_json::json!([1, 2, 3]));
    assert_eq!(value["error"], "boom");
}
