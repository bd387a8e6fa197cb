//! Integration tests for the sweep pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run the task
//! source, worker pool and result sink end-to-end. Malformed responses
//! that wiremock cannot produce are served from a raw TCP listener.

use page_sweep::config::SweepConfig;
use page_sweep::crawler::{collect, start, sweep, PageResult};
use page_sweep::output::{MemoryReporter, SweepStats};
use page_sweep::FailureKind;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a sweep configuration pointing at the mock server
fn create_test_config(server: &MockServer, start: u64, length: u64, workers: usize) -> SweepConfig {
    SweepConfig {
        url_template: format!("{}/%d", server.uri()),
        start,
        length,
        workers,
        selector: ".name".to_string(),
    }
}

fn item_page(id: u64) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            r#"<html><body><h1>Page</h1><div class="name">Item-{}</div></body></html>"#,
            id
        ))
        .insert_header("content-type", "text/html")
}

/// Mounts one page per id, each expected to be requested exactly once
async fn mount_items(server: &MockServer, ids: impl IntoIterator<Item = u64>) {
    for id in ids {
        Mock::given(method("GET"))
            .and(path(format!("/{}", id)))
            .respond_with(item_page(id))
            .expect(1)
            .mount(server)
            .await;
    }
}

async fn mount_status(server: &MockServer, id: u64, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", id)))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(server)
        .await;
}

struct Outcome {
    results: Vec<PageResult>,
    reporter: Arc<MemoryReporter>,
    stats: Arc<SweepStats>,
}

async fn run(config: &SweepConfig) -> Outcome {
    let reporter = Arc::new(MemoryReporter::new());
    let stats = Arc::new(SweepStats::new());

    let results = start(config, reporter.clone(), Arc::clone(&stats)).expect("Failed to start");
    let results = collect(results).await;

    Outcome {
        results,
        reporter,
        stats,
    }
}

/// Every id seen, from results and failures together
fn all_ids(outcome: &Outcome) -> Vec<u64> {
    let mut ids: Vec<u64> = outcome.results.iter().map(|r| r.id()).collect();
    ids.extend(outcome.reporter.failures().iter().map(|f| f.id));
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn test_mixed_success_and_bad_status() {
    let server = MockServer::start().await;
    mount_items(&server, 0..2).await;
    mount_status(&server, 2, 500).await;

    let config = create_test_config(&server, 0, 3, 2);
    let outcome = run(&config).await;

    assert_eq!(outcome.results.len(), 2);
    let fields: BTreeSet<&str> = outcome.results.iter().map(|r| r.field()).collect();
    assert_eq!(fields, BTreeSet::from(["Item-0", "Item-1"]));

    let failures = outcome.reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, 2);
    assert_eq!(failures[0].kind, FailureKind::BadStatus);
    assert!(failures[0].message.contains("500"));

    for result in &outcome.results {
        assert!(result.worker() < 2);
        assert_eq!(
            result.summary_line(),
            format!(
                "Url: {}/{}, Id: {}, Worker: {}",
                server.uri(),
                result.id(),
                result.id(),
                result.worker()
            )
        );
    }
}

#[tokio::test]
async fn test_rate_limited_page_is_isolated() {
    let server = MockServer::start().await;
    mount_items(&server, (0..10).filter(|id| *id != 5)).await;
    mount_status(&server, 5, 429).await;

    let config = create_test_config(&server, 0, 10, 3);
    let outcome = run(&config).await;

    assert_eq!(outcome.results.len(), 9);
    assert!(outcome.results.iter().all(|r| r.id() != 5));

    let failures = outcome.reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, 5);
    assert_eq!(failures[0].kind, FailureKind::RateLimited);

    let snapshot = outcome.stats.snapshot();
    assert_eq!(snapshot.attempted, 10);
    assert_eq!(snapshot.succeeded, 9);
    assert_eq!(snapshot.rate_limited, 1);
}

#[tokio::test]
async fn test_zero_length_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(item_page(0))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, 0, 0, 3);
    let reported = sweep(
        &config,
        Arc::new(MemoryReporter::new()),
        Arc::new(SweepStats::new()),
    )
    .await
    .expect("Sweep failed");

    assert_eq!(reported, 0);
}

#[tokio::test]
async fn test_ids_cover_range_exactly_once() {
    let server = MockServer::start().await;
    mount_items(&server, (7..19).filter(|id| id % 4 != 0)).await;
    mount_status(&server, 8, 404).await;
    mount_status(&server, 12, 503).await;
    mount_status(&server, 16, 429).await;

    let config = create_test_config(&server, 7, 12, 4);
    let outcome = run(&config).await;

    assert_eq!(all_ids(&outcome), (7..19).collect::<Vec<u64>>());
    assert_eq!(outcome.results.len(), 9);
    assert_eq!(outcome.reporter.failures().len(), 3);
    assert_eq!(outcome.stats.snapshot().attempted, 12);
}

#[tokio::test]
async fn test_more_workers_than_pages() {
    let server = MockServer::start().await;
    mount_items(&server, 0..2).await;

    let config = create_test_config(&server, 0, 2, 8);
    let outcome = run(&config).await;

    assert_eq!(all_ids(&outcome), vec![0, 1]);
}

#[tokio::test]
async fn test_single_worker_completes() {
    let server = MockServer::start().await;
    mount_items(&server, 0..5).await;

    let config = create_test_config(&server, 0, 5, 1);
    let outcome = run(&config).await;

    assert_eq!(outcome.results.len(), 5);
    assert!(outcome.results.iter().all(|r| r.worker() == 0));
}

#[tokio::test]
async fn test_repeat_runs_yield_same_fields() {
    let server = MockServer::start().await;
    for id in 0..6 {
        Mock::given(method("GET"))
            .and(path(format!("/{}", id)))
            .respond_with(item_page(id))
            .mount(&server)
            .await;
    }

    let config = create_test_config(&server, 0, 6, 3);

    let mut first: Vec<String> = run(&config)
        .await
        .results
        .iter()
        .map(|r| r.field().to_string())
        .collect();
    let mut second: Vec<String> = run(&config)
        .await
        .results
        .iter()
        .map(|r| r.field().to_string())
        .collect();
    first.sort();
    second.sort();

    assert_eq!(first.len(), 6);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_page_without_field_yields_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>no name here</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, 0, 1, 1);
    let outcome = run(&config).await;

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].field(), "");
}

#[tokio::test]
async fn test_unreachable_host_fails_every_task() {
    // Bind then release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = SweepConfig {
        url_template: format!("http://127.0.0.1:{}/%d", port),
        start: 0,
        length: 4,
        workers: 2,
        selector: ".name".to_string(),
    };
    let outcome = run(&config).await;

    assert!(outcome.results.is_empty());
    let failures = outcome.reporter.failures();
    assert_eq!(failures.len(), 4);
    assert!(failures.iter().all(|f| f.kind == FailureKind::Network));
    assert_eq!(all_ids(&outcome), vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_workers_fetch_concurrently() {
    let server = MockServer::start().await;
    for id in 0..4 {
        Mock::given(method("GET"))
            .and(path(format!("/{}", id)))
            .respond_with(item_page(id).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;
    }

    let config = create_test_config(&server, 0, 4, 4);
    let started = Instant::now();
    let outcome = run(&config).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.results.len(), 4);
    // Serial fetching would take at least 2s
    assert!(
        elapsed < Duration::from_millis(1500),
        "Expected concurrent fetches, took {:?}",
        elapsed
    );
}

/// Serves item pages over raw HTTP, cutting the body of `broken_id` short
///
/// Returns the URL template for the server.
async fn serve_with_truncated_page(broken_id: u64) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(answer(socket, broken_id));
        }
    });

    format!("http://{}/%d", addr)
}

async fn answer(mut socket: TcpStream, broken_id: u64) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let id: u64 = request
        .split_whitespace()
        .nth(1)
        .and_then(|path| path.trim_start_matches('/').parse().ok())
        .unwrap_or(u64::MAX);

    let response = if id == broken_id {
        "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort".to_string()
    } else {
        let body = format!(r#"<div class="name">Item-{}</div>"#, id);
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    };

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

#[tokio::test]
async fn test_unreadable_body_is_reported_and_dropped() {
    let config = SweepConfig {
        url_template: serve_with_truncated_page(1).await,
        start: 0,
        length: 4,
        workers: 2,
        selector: ".name".to_string(),
    };
    let outcome = run(&config).await;

    let fields: BTreeSet<&str> = outcome.results.iter().map(|r| r.field()).collect();
    assert_eq!(fields, BTreeSet::from(["Item-0", "Item-2", "Item-3"]));

    let failures = outcome.reporter.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, 1);
    assert_eq!(failures[0].kind, FailureKind::Parse);

    assert_eq!(all_ids(&outcome), vec![0, 1, 2, 3]);
    assert_eq!(outcome.stats.snapshot().parse, 1);
}

#[tokio::test]
async fn test_relative_template_fails_to_start() {
    let config = SweepConfig {
        url_template: "/items/%d".to_string(),
        start: 0,
        length: 3,
        workers: 2,
        selector: ".name".to_string(),
    };

    let result = start(
        &config,
        Arc::new(MemoryReporter::new()),
        Arc::new(SweepStats::new()),
    );
    assert!(matches!(
        result,
        Err(page_sweep::SweepError::Config(page_sweep::ConfigError::InvalidUrl(_)))
    ));
}

#[tokio::test]
async fn test_too_many_workers_fails_to_start() {
    let server = MockServer::start().await;
    let config = create_test_config(&server, 0, 3, page_sweep::config::MAX_WORKERS + 1);

    let result = start(
        &config,
        Arc::new(MemoryReporter::new()),
        Arc::new(SweepStats::new()),
    );
    assert!(matches!(
        result,
        Err(page_sweep::SweepError::Config(page_sweep::ConfigError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_invalid_template_fails_to_start() {
    let server = MockServer::start().await;
    let mut config = create_test_config(&server, 0, 3, 2);
    config.url_template = format!("{}/page", server.uri());

    let result = start(
        &config,
        Arc::new(MemoryReporter::new()),
        Arc::new(SweepStats::new()),
    );
    assert!(matches!(result, Err(page_sweep::SweepError::Template(_))));
}

#[tokio::test]
async fn test_zero_workers_fails_to_start() {
    let server = MockServer::start().await;
    let config = create_test_config(&server, 0, 3, 0);

    let result = start(
        &config,
        Arc::new(MemoryReporter::new()),
        Arc::new(SweepStats::new()),
    );
    assert!(matches!(result, Err(page_sweep::SweepError::Config(_))));
}
