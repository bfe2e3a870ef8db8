//! End-to-end tests for the run orchestration.
//!
//! These run the full pipeline — hosts file, population, queueing, probing,
//! result storage — against a wiremock server, then inspect the store.

use std::io::Write;
use std::sync::Arc;

use pwa_probe::store::{JobStore, MemoryStore};
use pwa_probe::{run_probes_with, CapabilityRecord, Config, StaticList};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a hosts file with the given lines.
fn write_hosts_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write host line");
    }
    file.flush().expect("Failed to flush file");
    file
}

fn test_config(hosts_file: &NamedTempFile, namespace: &str) -> Config {
    Config {
        hosts_file: Some(hosts_file.path().to_path_buf()),
        namespace: namespace.to_string(),
        max_concurrency: 4,
        timeout_seconds: 5,
        populate_interval_ms: 10,
        user_agent: "pwa_probe_test/1.0".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn run_stores_records_keyed_by_hostname() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", "https://example.com/"),
        )
        .mount(&server)
        .await;

    let host = server
        .uri()
        .strip_prefix("http://")
        .expect("mock uri is http")
        .to_string();
    let hosts_file = write_hosts_file(&["# probe targets", "", &host]);
    let config = test_config(&hosts_file, "run-test");

    let store = MemoryStore::new();
    let report = run_probes_with(config, StaticList::new(), Arc::new(store.clone()))
        .await
        .expect("run should succeed");

    assert_eq!(report.total_jobs, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);

    // The record lands in the run's namespace under the job title.
    store.select("run-test").await.unwrap();
    let raw = store
        .get(&host)
        .await
        .unwrap()
        .expect("result stored under hostname");
    let record: CapabilityRecord = serde_json::from_str(&raw).expect("stored value is a record");
    assert!(record.has_https_redirect);
    assert!(!record.has_https);
}

#[tokio::test]
async fn invalid_host_lines_are_counted_as_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let host = server
        .uri()
        .strip_prefix("http://")
        .expect("mock uri is http")
        .to_string();
    let hosts_file = write_hosts_file(&[&host, "not a hostname"]);
    let config = test_config(&hosts_file, "run-reject-test");

    let store = MemoryStore::new();
    let report = run_probes_with(config, StaticList::new(), Arc::new(store.clone()))
        .await
        .expect("run should succeed");

    assert_eq!(report.total_jobs, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    store.select("run-reject-test").await.unwrap();
    assert!(store.get(&host).await.unwrap().is_some());
    assert!(store.get("not a hostname").await.unwrap().is_none());
}

#[tokio::test]
async fn missing_hosts_file_fails_the_run() {
    let config = Config {
        hosts_file: Some("/definitely/not/a/real/file".into()),
        ..Default::default()
    };
    let result = run_probes_with(
        config,
        StaticList::new(),
        Arc::new(MemoryStore::new()),
    )
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn stored_records_use_the_wire_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let host = server
        .uri()
        .strip_prefix("http://")
        .expect("mock uri is http")
        .to_string();
    let hosts_file = write_hosts_file(&[&host]);
    let config = test_config(&hosts_file, "run-wire-test");

    let store = MemoryStore::new();
    run_probes_with(config, StaticList::new(), Arc::new(store.clone()))
        .await
        .expect("run should succeed");

    store.select("run-wire-test").await.unwrap();
    let raw = store.get(&host).await.unwrap().expect("result stored");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for flag in [
        "hasHTTPS",
        "hasHSTS",
        "hasHTTPSRedirect",
        "hasManifest",
        "hasServiceWorker",
        "hasPushSubscription",
    ] {
        assert!(value.get(flag).is_some(), "missing flag {flag}");
        assert!(value[flag].is_boolean(), "{flag} should be boolean");
    }
}
