// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use ctfscout::domain::models::log_event::{LogEvent, LogLevel};
use ctfscout::domain::models::run::RunStatus;
use ctfscout::domain::services::crawl_service::{CrawlError, CrawlService};
use ctfscout::domain::services::observer::CrawlObserver;
use ctfscout::domain::services::relevance_filter::RelevanceFilter;
use ctfscout::engines::reqwest_engine::ReqwestEngine;
use ctfscout::extractors::registry::ExtractorRegistry;
use ctfscout::utils::rate_limit::RateLimiter;
use ctfscout::utils::robots::{CourtesyCheck, CourtesyChecker, CourtesyVerdict, PolicyPresence};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CTFTIME_LISTING: &str = r#"
    <html><body><table>
        <tr id="event_id_1">
            <td><a href="/event/1">RICSEC Open</a></td>
            <td>10 May</td>
            <td>Jeopardy</td>
            <td>Online</td>
        </tr>
        <tr id="event_id_2">
            <td><a href="/event/2">Tokyo Sec Wars</a></td>
            <td>12 May</td>
            <td>Attack-Defense</td>
            <td>Tokyo, Japan</td>
        </tr>
    </table></body></html>
"#;

const GENERIC_PAGE: &str = r#"
    <html><head><title>Campus Club News</title></head>
    <body><p>Our capture the flag study group meets weekly.</p></body></html>
"#;

/// No courtesy delay so the suite stays fast
fn test_service() -> CrawlService {
    CrawlService::new_with_components(
        Arc::new(ReqwestEngine),
        Arc::new(CourtesyChecker::new(Duration::from_secs(2))),
        ExtractorRegistry::default(),
        RelevanceFilter::default(),
        RateLimiter::new(Duration::from_millis(0)),
        Duration::from_secs(5),
    )
}

async fn start_site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    // Path carries the site marker so the structured strategy is selected
    Mock::given(method("GET"))
        .and(path("/ctftime.org/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CTFTIME_LISTING))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/club"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GENERIC_PAGE))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_counters_partition_all_urls() {
    let server = start_site().await;
    let service = test_service();
    let urls = vec![
        format!("{}/ctftime.org/events", server.uri()),
        format!("{}/club", server.uri()),
        format!("{}/missing", server.uri()),
    ];

    let report = service.start(urls).await.expect("run should complete");

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.stats.total, 3);
    assert_eq!(report.stats.success, 2);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.skipped, 0);
    assert_eq!(report.stats.processed(), report.stats.total);

    // Only the online ctftime row survives the relevance filter; the generic
    // page's single record carries an "Unknown" location and is dropped
    assert_eq!(report.competitions.len(), 1);
    assert_eq!(report.competitions[0].name, "RICSEC Open");

    let log = service.log();
    assert!(log.iter().any(|event| {
        event.level == LogLevel::Error
            && event.message.contains("HTTP 404")
            && event.message.contains("/missing")
    }));
    assert!(log
        .iter()
        .any(|event| event.message.contains("Crawl completed: 1 competitions found")));
}

#[tokio::test]
async fn test_duplicate_urls_are_crawled_once() {
    let server = start_site().await;
    let service = test_service();
    let target = format!("{}/ctftime.org/events", server.uri());
    let urls = vec![target.clone(), target.clone(), target];

    let report = service.start(urls).await.expect("run should complete");

    assert_eq!(report.stats.total, 1);
    assert_eq!(report.stats.success, 1);
    assert_eq!(report.competitions.len(), 1);
}

#[tokio::test]
async fn test_empty_url_list_completes_with_zero_stats() {
    let service = test_service();
    let report = service.start(Vec::new()).await.expect("run should complete");

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.stats.total, 0);
    assert_eq!(report.stats.processed(), 0);
    assert!(report.competitions.is_empty());
}

/// 在收到首条日志时立即请求取消
struct CancelOnStart {
    service: Mutex<Option<Arc<CrawlService>>>,
}

#[async_trait]
impl CrawlObserver for CancelOnStart {
    async fn on_log(&self, event: &LogEvent) {
        if event.message.starts_with("Starting crawl") {
            let service = self.service.lock().unwrap().clone();
            if let Some(service) = service {
                service.cancel();
            }
        }
    }
}

#[tokio::test]
async fn test_cancellation_before_first_url_yields_zero_counts() {
    let server = start_site().await;
    let observer = Arc::new(CancelOnStart {
        service: Mutex::new(None),
    });
    let service = Arc::new(test_service().with_observer(observer.clone()));
    *observer.service.lock().unwrap() = Some(service.clone());

    let urls = vec![
        format!("{}/ctftime.org/events", server.uri()),
        format!("{}/club", server.uri()),
    ];
    let report = service.start(urls).await.expect("run should resolve");

    assert_eq!(report.status, RunStatus::Cancelled);
    assert_eq!(report.stats.total, 2);
    assert_eq!(report.stats.success, 0);
    assert_eq!(report.stats.failed, 0);
    assert_eq!(report.stats.skipped, 0);
    assert!(report.competitions.is_empty());
}

/// 在首个URL成功后请求取消
struct CancelAfterFirstSuccess {
    service: Mutex<Option<Arc<CrawlService>>>,
}

#[async_trait]
impl CrawlObserver for CancelAfterFirstSuccess {
    async fn on_log(&self, event: &LogEvent) {
        if event.message.contains("relevant competitions at") {
            let service = self.service.lock().unwrap().clone();
            if let Some(service) = service {
                service.cancel();
            }
        }
    }
}

#[tokio::test]
async fn test_mid_run_cancellation_keeps_completed_counts() {
    let server = start_site().await;
    let observer = Arc::new(CancelAfterFirstSuccess {
        service: Mutex::new(None),
    });
    let service = Arc::new(test_service().with_observer(observer.clone()));
    *observer.service.lock().unwrap() = Some(service.clone());

    let urls = vec![
        format!("{}/ctftime.org/events", server.uri()),
        format!("{}/club", server.uri()),
        format!("{}/missing", server.uri()),
    ];
    let report = service.start(urls).await.expect("run should resolve");

    assert_eq!(report.status, RunStatus::Cancelled);
    // The first URL finished and keeps its count; the remaining two were
    // never started and the cancellation itself increments nothing
    assert_eq!(report.stats.success, 1);
    assert_eq!(report.stats.failed, 0);
    assert_eq!(report.stats.skipped, 0);
    assert_eq!(report.competitions.len(), 1);

    let log = service.log();
    assert!(log
        .iter()
        .any(|event| event.level == LogLevel::Warning
            && event.message.contains("Cancellation requested")));
}

/// 记录收到的全部日志事件
struct RecordingObserver {
    events: Mutex<Vec<LogEvent>>,
}

#[async_trait]
impl CrawlObserver for RecordingObserver {
    async fn on_log(&self, event: &LogEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn test_observers_receive_cancellation_warning() {
    let server = start_site().await;
    let canceller = Arc::new(CancelAfterFirstSuccess {
        service: Mutex::new(None),
    });
    let recorder = Arc::new(RecordingObserver {
        events: Mutex::new(Vec::new()),
    });
    let service = Arc::new(
        test_service()
            .with_observer(canceller.clone())
            .with_observer(recorder.clone()),
    );
    *canceller.service.lock().unwrap() = Some(service.clone());

    let urls = vec![
        format!("{}/ctftime.org/events", server.uri()),
        format!("{}/club", server.uri()),
    ];
    let report = service.start(urls).await.expect("run should resolve");
    assert_eq!(report.status, RunStatus::Cancelled);

    // The warning must reach the observer stream, not only the pulled snapshot
    let events = recorder.events.lock().unwrap();
    assert!(events.iter().any(|event| {
        event.level == LogLevel::Warning && event.message.contains("Cancellation requested")
    }));
}

#[tokio::test]
async fn test_cancellation_during_fetch_leaves_failed_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let service = Arc::new(test_service());
    let runner = service.clone();
    let url = format!("{}/slow", server.uri());
    let handle = tokio::spawn(async move { runner.start(vec![url.clone()]).await });

    // Let the run get past the courtesy probe and into the slow fetch
    tokio::time::sleep(Duration::from_millis(300)).await;
    service.cancel();

    let report = handle
        .await
        .expect("task should join")
        .expect("run should resolve");

    assert_eq!(report.status, RunStatus::Cancelled);
    // An aborted in-flight fetch is not a failure and lands in no bucket
    assert_eq!(report.stats.failed, 0);
    assert_eq!(report.stats.success, 0);
    assert_eq!(report.stats.skipped, 0);
    assert!(report.competitions.is_empty());

    let log = service.log();
    assert!(log
        .iter()
        .any(|event| event.message.contains("Scraping cancelled for")));
}

#[tokio::test]
async fn test_concurrent_start_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let service = Arc::new(test_service());
    let runner = service.clone();
    let url = format!("{}/page", server.uri());
    let handle = tokio::spawn(async move { runner.start(vec![url]).await });

    // Let the first run park inside the courtesy probe
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(service.status(), RunStatus::Running);

    let second = service.start(vec!["https://example.com".to_string()]).await;
    assert!(matches!(second, Err(CrawlError::AlreadyRunning)));

    service.cancel();
    let report = handle
        .await
        .expect("task should join")
        .expect("run should resolve");
    assert_eq!(report.status, RunStatus::Cancelled);
}

/// 全部拒绝的礼貌检查桩，覆盖当前实现尚未产生的拒绝路径
struct DenyAll;

#[async_trait]
impl CourtesyCheck for DenyAll {
    async fn check(&self, url: &str, _cancel: &CancellationToken) -> CourtesyVerdict {
        CourtesyVerdict {
            allowed: false,
            policy_url: Some(format!("{}/robots.txt", url)),
            presence: PolicyPresence::Present,
        }
    }
}

#[tokio::test]
async fn test_courtesy_denial_counts_as_skipped_without_fetching() {
    let service = CrawlService::new_with_components(
        Arc::new(ReqwestEngine),
        Arc::new(DenyAll),
        ExtractorRegistry::default(),
        RelevanceFilter::default(),
        RateLimiter::new(Duration::from_millis(0)),
        Duration::from_secs(5),
    );

    // No server is listening; a fetch attempt would surface as a failure
    let urls = vec![
        "http://127.0.0.1:9/a".to_string(),
        "http://127.0.0.1:9/b".to_string(),
    ];
    let report = service.start(urls).await.expect("run should complete");

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.stats.skipped, 2);
    assert_eq!(report.stats.success, 0);
    assert_eq!(report.stats.failed, 0);
    assert!(report.competitions.is_empty());

    let log = service.log();
    assert!(log
        .iter()
        .any(|event| event.message.contains("due to robots.txt restrictions")));
}
