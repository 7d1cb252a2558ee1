mod common;

use std::time::Duration;

use common::{FailingProvider, ScriptedProvider, SlowProvider, date};
use serde_json::{Value, json};
use stock_charts::{
    Error,
    controller::{COMPARISON_CHART, ComparisonController, EntityRef, EventHandler},
    errors::StoreError,
    frontend::run_event_feed,
    models::selection::DateWindow,
    providers::ProviderError,
    render::JsonLinesSurface,
};

fn window() -> DateWindow {
    DateWindow::new(date(2020, 1, 1), date(2024, 1, 1)).unwrap()
}

fn provider() -> ScriptedProvider {
    ScriptedProvider::default()
        .with(
            "AAPL",
            &[
                (date(2020, 1, 2), 75.09),
                (date(2020, 1, 3), 74.36),
                (date(2020, 1, 6), 74.95),
            ],
        )
        .with(
            "MSFT",
            &[(date(2020, 1, 2), 160.62), (date(2020, 1, 3), 158.62)],
        )
        .with("NVDA", &[(date(2020, 1, 2), 5.99)])
}

#[tokio::test]
async fn googl_twice_is_a_duplicate() {
    let provider = ScriptedProvider::default().with("GOOGL", &[(date(2020, 1, 2), 68.43)]);
    let mut cmp = ComparisonController::new(provider, window(), "Stock Comparison");

    cmp.add_entity(Some("GOOGL")).await.unwrap();
    let err = cmp.add_entity(Some("googl")).await.unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::DuplicateEntity { .. })));
    assert_eq!(cmp.tracked().len(), 1);
}

#[tokio::test]
async fn removing_position_three_of_two_changes_nothing() {
    let mut cmp = ComparisonController::new(provider(), window(), "Stock Comparison");
    cmp.add_entity(Some("AAPL")).await.unwrap();
    cmp.add_entity(Some("MSFT")).await.unwrap();
    let before = cmp.current().cloned();

    let err = cmp
        .remove_entity(Some(&EntityRef::Position(3)))
        .unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::NotFound { .. })));
    assert_eq!(
        cmp.tracked().symbols().collect::<Vec<_>>(),
        vec!["AAPL", "MSFT"]
    );
    assert_eq!(cmp.current().cloned(), before);
}

#[tokio::test]
async fn provider_errors_leave_state_untouched() {
    let mut cmp = ComparisonController::new(FailingProvider, window(), "Stock Comparison");

    let err = cmp.add_entity(Some("AAPL")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::FetchFailure {
            source: ProviderError::Api(_),
            ..
        }
    ));
    assert!(cmp.tracked().is_empty());
    assert!(cmp.current().is_none());
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_times_out() {
    let provider = SlowProvider {
        delay: Duration::from_secs(60),
    };
    let mut cmp = ComparisonController::new(provider, window(), "Stock Comparison")
        .with_fetch_timeout(Duration::from_secs(10));

    let err = cmp.add_entity(Some("AAPL")).await.unwrap_err();
    match err {
        Error::FetchTimeout { symbol, timeout } => {
            assert_eq!(symbol, "AAPL");
            assert_eq!(timeout, Duration::from_secs(10));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(cmp.tracked().is_empty());
}

#[tokio::test(start_paused = true)]
async fn fetch_within_timeout_succeeds() {
    let provider = SlowProvider {
        delay: Duration::from_secs(2),
    };
    let mut cmp = ComparisonController::new(provider, window(), "Stock Comparison")
        .with_fetch_timeout(Duration::from_secs(10));

    assert!(cmp.add_entity(Some("AAPL")).await.unwrap().is_some());
    assert_eq!(cmp.tracked().len(), 1);
}

#[tokio::test]
async fn watch_feed_drives_the_overlay_chart() {
    let mut cmp = ComparisonController::new(provider(), window(), "Stock Comparison");
    let input = [
        r#"{"event":"add_entity","entity":"AAPL"}"#,
        r#"{"event":"add_entity","entity":"MSFT"}"#,
        r#"{"event":"add_entity","entity":"aapl"}"#,
        r#"{"event":"add_entity","entity":""}"#,
        r#"{"event":"add_entity","entity":"TSLA"}"#,
        r#"{"event":"remove_entity","target":1}"#,
        r#"{"event":"set_range","start":"2020-01-03","end":"2020-01-31"}"#,
        r#"{"event":"select_entity","entity":"AAPL"}"#,
    ]
    .join("\n");

    let mut surface = JsonLinesSurface::new(Vec::new());
    let summary = run_event_feed(&mut cmp, input.as_bytes(), &mut surface)
        .await
        .unwrap();
    assert_eq!(summary.rendered, 4);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.rejected, 2);

    let lines: Vec<Value> = String::from_utf8(surface.into_inner())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    let names = |line: &Value| -> Vec<String> {
        line["figure"]["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect()
    };

    assert_eq!(lines[0]["chart_id"], COMPARISON_CHART);
    assert_eq!(names(&lines[0]), vec!["AAPL"]);
    assert_eq!(names(&lines[1]), vec!["AAPL", "MSFT"]);
    assert!(lines[2]["notice"].as_str().unwrap().contains("already tracked"));
    assert!(lines[3]["notice"].as_str().unwrap().contains("TSLA"));
    assert_eq!(names(&lines[4]), vec!["MSFT"]);
    assert_eq!(lines[5]["figure"]["data"][0]["y"], json!([158.62]));
    assert_eq!(lines[5]["figure"]["layout"]["xaxis"]["title"]["text"], "Date");
    assert_eq!(lines.len(), 6);
}
