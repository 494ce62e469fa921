//! End-to-end runs of the CLI commands against a mock data service.

use std::time::Duration;

use chrono::NaiveDate;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use corpact::fetch::config::{DEFAULT_API_PATH, DEFAULT_LISTING_PATH};
use corpact::{DatasetQuery, FetchConfig};
use corpact_cli::cli::{build_cmd, fetch_cmd, render_cmd, run_cmd};
use corpact_cli::PipelineConfig;

const SOURCE_CSV: &str = "\"SYMBOL\",\"COMPANY NAME\",\"PURPOSE\",\"EX-DATE\",\"RECORD DATE\"
\"ALPHA\",\"Alpha Ltd\",\"Interim Dividend - Rs 3 Per Share\",\"20-Aug-2025\",\"20-Aug-2025\"
\"BETA\",\"Beta Ltd\",\"Bonus 2:1\",\"-\",\"-\"
\"GAMMA\",\"Gamma Ltd\",\"Interest Payment\",\"10-Aug-2025\",\"10-Aug-2025\"
";

// ── helpers ──

async fn mock_service(body: &'static str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("home"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DEFAULT_LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("listing"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DEFAULT_API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/csv"))
        .mount(&server)
        .await;
    server
}

fn fetch_config(server: &MockServer) -> FetchConfig {
    FetchConfig {
        base_url: server.uri(),
        bootstrap_pause: Duration::ZERO,
        retry_backoff: Duration::ZERO,
        ..FetchConfig::default()
    }
}

fn query() -> DatasetQuery {
    DatasetQuery::new(
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 8, 31).unwrap(),
    )
}

// ── tests ──

#[tokio::test]
async fn test_run_writes_csv_json_and_html() {
    let server = mock_service(SOURCE_CSV).await;
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path().join("site"));

    let doc = run_cmd::run(&config, fetch_config(&server), &query(), false)
        .await
        .unwrap();
    assert_eq!(doc.dividends.len(), 1);
    assert_eq!(doc.bonuses.len(), 1);

    assert_eq!(
        std::fs::read_to_string(config.csv_path()).unwrap(),
        SOURCE_CSV
    );

    let json: Value =
        serde_json::from_str(&std::fs::read_to_string(config.json_path()).unwrap()).unwrap();
    assert_eq!(json["dividends"][0]["symbol"], "ALPHA");
    assert_eq!(json["dividends"][0]["cat"], "Interim");
    assert_eq!(json["dividends"][0]["amount"], "\u{20B9}3");
    assert_eq!(json["dividends"][0]["ex"], "2025-08-20");
    assert_eq!(json["bonuses"][0]["ratio"], "2:1");
    assert_eq!(json["bonuses"][0]["ex"], "");
    assert_eq!(json["splits"].as_array().unwrap().len(), 0);
    assert_eq!(json["others"].as_array().unwrap().len(), 0);

    let html = std::fs::read_to_string(config.html_path()).unwrap();
    assert!(html.contains("Alpha Ltd (ALPHA)"));
    assert!(!html.contains("GAMMA"));
}

#[tokio::test]
async fn test_run_with_bad_dates_writes_no_reports() {
    let bad = "SYMBOL,COMPANY NAME,PURPOSE,EX-DATE,RECORD DATE\nBAD,Bad Ltd,Dividend,2025-08-20,-\n";
    let server = mock_service(bad).await;
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());

    let err = run_cmd::run(&config, fetch_config(&server), &query(), false)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("BAD"));
    assert!(!config.json_path().exists());
    assert!(!config.html_path().exists());
}

#[tokio::test]
async fn test_fetch_then_build_then_render() {
    let server = mock_service(SOURCE_CSV).await;
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());

    let csv_path = fetch_cmd::run(&config, fetch_config(&server), &query(), None)
        .await
        .unwrap();
    assert_eq!(csv_path, config.csv_path());
    assert!(!config.json_path().exists());

    let built = build_cmd::run(&config, None).unwrap();
    assert_eq!(built.dividends[0].name, "Alpha Ltd");

    std::fs::remove_file(config.html_path()).unwrap();
    let rendered = render_cmd::run(&config, None).unwrap();
    assert_eq!(rendered, built);
    assert!(config.html_path().exists());
}

#[test]
fn test_build_missing_input_names_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(dir.path());
    let err = build_cmd::run(&config, None).unwrap_err();
    assert!(format!("{err:#}").contains("corporate_actions_upcoming.csv"));
}
