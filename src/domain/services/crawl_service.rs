// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::models::competition::Competition;
use crate::domain::models::log_event::{LogEvent, LogLevel};
use crate::domain::models::run::{CrawlReport, RunStatus};
use crate::domain::models::stats::{CrawlStats, StatKey};
use crate::domain::services::observer::CrawlObserver;
use crate::domain::services::relevance_filter::RelevanceFilter;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{FetchEngine, FetchError, FetchRequest};
use crate::extractors::registry::ExtractorRegistry;
use crate::utils::rate_limit::RateLimiter;
use crate::utils::robots::{CourtesyCheck, CourtesyChecker, PolicyPresence};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 爬取服务错误类型
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 同一时刻只允许一个活动运行
    #[error("a crawl is already running")]
    AlreadyRunning,
}

/// 一次运行的内部状态
///
/// 统计、日志和结果在运行期间由编排器独占持有，
/// 对外只通过事件通知和只读快照发布
struct RunState {
    status: RunStatus,
    stats: CrawlStats,
    log: Vec<LogEvent>,
    results: Vec<Competition>,
    run_id: Uuid,
    cancel: CancellationToken,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            status: RunStatus::Idle,
            stats: CrawlStats::default(),
            log: Vec::new(),
            results: Vec::new(),
            run_id: Uuid::new_v4(),
            cancel: CancellationToken::new(),
        }
    }
}

/// 爬取服务
///
/// 驱动目标URL依次通过礼貌检查、限速延迟、抓取、提取和相关性
/// 过滤五个阶段，累积记录并维护运行统计与日志。
/// URL严格串行处理，唯一的并发来自外部的协作式取消信号：
/// 取消检查发生在每个URL的第一个副作用之前，并贯穿进行中的网络调用。
pub struct CrawlService {
    /// 抓取引擎
    engine: Arc<dyn FetchEngine>,
    /// 礼貌检查器
    courtesy: Arc<dyn CourtesyCheck>,
    /// 提取策略注册表
    registry: ExtractorRegistry,
    /// 相关性过滤器
    filter: RelevanceFilter,
    /// 固定延迟限速器
    rate_limiter: RateLimiter,
    /// 单次抓取超时
    request_timeout: Duration,
    /// 注册的观察者
    observers: Vec<Arc<dyn CrawlObserver>>,
    /// 运行状态
    state: Mutex<RunState>,
}

impl CrawlService {
    /// 根据配置创建新的爬取服务实例
    pub fn new(settings: &Settings) -> Self {
        Self::new_with_components(
            Arc::new(ReqwestEngine),
            Arc::new(CourtesyChecker::new(Duration::from_secs(
                settings.crawler.robots_timeout_secs,
            ))),
            ExtractorRegistry::default(),
            RelevanceFilter::new(&settings.filter.locations),
            RateLimiter::new(Duration::from_millis(settings.crawler.delay_ms)),
            Duration::from_secs(settings.crawler.request_timeout_secs),
        )
    }

    /// 使用自定义组件创建爬取服务实例
    pub fn new_with_components(
        engine: Arc<dyn FetchEngine>,
        courtesy: Arc<dyn CourtesyCheck>,
        registry: ExtractorRegistry,
        filter: RelevanceFilter,
        rate_limiter: RateLimiter,
        request_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            courtesy,
            registry,
            filter,
            rate_limiter,
            request_timeout,
            observers: Vec::new(),
            state: Mutex::new(RunState::default()),
        }
    }

    /// 注册观察者
    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// 启动一次爬取运行
    ///
    /// URL列表去重后按插入顺序依次处理。所有单URL错误都在此吸收为
    /// 日志和统计，不向调用方传播；只有显式取消会提前终止整个运行。
    ///
    /// # 参数
    ///
    /// * `urls` - 目标URL列表
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 运行终态报告（完成或取消）
    /// * `Err(CrawlError::AlreadyRunning)` - 已有活动运行
    pub async fn start(&self, urls: Vec<String>) -> Result<CrawlReport, CrawlError> {
        let (run_id, cancel, targets) = {
            let mut state = self.state.lock();
            if state.status == RunStatus::Running {
                return Err(CrawlError::AlreadyRunning);
            }

            let targets = dedup_urls(urls);
            state.status = RunStatus::Running;
            state.stats = CrawlStats::for_run(targets.len() as u32);
            state.log.clear();
            state.results.clear();
            state.run_id = Uuid::new_v4();
            state.cancel = CancellationToken::new();
            (state.run_id, state.cancel.clone(), targets)
        };

        info!(run_id = %run_id, "starting crawl of {} URLs", targets.len());
        self.emit(LogLevel::Info, format!("Starting crawl of {} URLs", targets.len()))
            .await;

        for url in &targets {
            // The cancellation check happens before the next URL's first side effect
            if cancel.is_cancelled() {
                break;
            }
            self.process_url(url, &cancel).await;
        }

        // The cancellation warning goes through emit so observers see it too;
        // cancel() itself only fires the token
        if cancel.is_cancelled() {
            self.emit(
                LogLevel::Warning,
                "Cancellation requested - stopping at the next URL boundary",
            )
            .await;
        }

        let (status, report) = {
            let mut state = self.state.lock();
            let status = if cancel.is_cancelled() {
                RunStatus::Cancelled
            } else {
                RunStatus::Completed
            };
            state.status = status;
            (
                status,
                CrawlReport {
                    run_id,
                    status,
                    stats: state.stats,
                    competitions: state.results.clone(),
                },
            )
        };

        match status {
            RunStatus::Cancelled => {
                self.emit(
                    LogLevel::Info,
                    format!(
                        "Crawl cancelled - {} competitions collected",
                        report.competitions.len()
                    ),
                )
                .await;
            }
            _ => {
                self.emit(
                    LogLevel::Success,
                    format!(
                        "Crawl completed: {} competitions found",
                        report.competitions.len()
                    ),
                )
                .await;
            }
        }

        Ok(report)
    }

    /// 请求取消当前运行
    ///
    /// 幂等：令牌只会触发一次；空闲状态下除调试日志外无任何效果。
    /// 对应的警告日志事件由运行任务在URL边界统一产生并通知观察者。
    pub fn cancel(&self) {
        let state = self.state.lock();
        if state.status != RunStatus::Running {
            debug!("cancel requested while no run is active");
            return;
        }
        if state.cancel.is_cancelled() {
            return;
        }

        state.cancel.cancel();
        warn!(run_id = %state.run_id, "cancellation requested");
    }

    /// 当前运行状态快照
    pub fn status(&self) -> RunStatus {
        self.state.lock().status
    }

    /// 当前统计快照
    pub fn stats(&self) -> CrawlStats {
        self.state.lock().stats
    }

    /// 当前运行日志快照
    pub fn log(&self) -> Vec<LogEvent> {
        self.state.lock().log.clone()
    }

    /// 当前结果快照
    pub fn results(&self) -> Vec<Competition> {
        self.state.lock().results.clone()
    }

    /// 处理单个URL
    ///
    /// 依次执行礼貌检查、限速延迟、抓取、提取和过滤；
    /// 每个URL恰好进入成功、失败、跳过三个桶之一，
    /// 取消的在途URL不计入任何桶
    async fn process_url(&self, url: &str, cancel: &CancellationToken) {
        self.emit(LogLevel::Info, format!("Scraping: {}", url)).await;

        let verdict = self.courtesy.check(url, cancel).await;
        if let Some(policy_url) = &verdict.policy_url {
            self.emit(LogLevel::Info, format!("Checking robots.txt at {}", policy_url))
                .await;
        }
        match &verdict.presence {
            PolicyPresence::Present => {
                self.emit(LogLevel::Success, "Found robots.txt - respecting rules")
                    .await;
            }
            PolicyPresence::Absent => {
                self.emit(
                    LogLevel::Info,
                    "No robots.txt found - proceeding with caution",
                )
                .await;
            }
            PolicyPresence::Unreachable(message) => {
                self.emit(
                    LogLevel::Warning,
                    format!("Could not check robots.txt: {}", message),
                )
                .await;
            }
        }
        if !verdict.allowed {
            self.emit(
                LogLevel::Warning,
                format!("Skipping {} due to robots.txt restrictions", url),
            )
            .await;
            self.bump(StatKey::Skipped).await;
            return;
        }

        // Courtesy delay before every fetch, regardless of prior outcome
        if !self.rate_limiter.wait(cancel).await {
            // Cancelled during the delay; the loop exits at the URL boundary
            return;
        }

        let request = FetchRequest {
            url: url.to_string(),
            timeout: self.request_timeout,
        };
        let html = match self.engine.fetch(&request, cancel).await {
            Ok(body) => body,
            Err(FetchError::Cancelled) => {
                self.emit(LogLevel::Info, format!("Scraping cancelled for {}", url))
                    .await;
                return;
            }
            Err(err) => {
                self.emit(LogLevel::Error, format!("Error scraping {}: {}", url, err))
                    .await;
                self.bump(StatKey::Failed).await;
                return;
            }
        };

        let extracted = self.registry.extract(&html, url);
        let kept = self.filter.retain(extracted);
        self.emit(
            LogLevel::Success,
            format!("Found {} relevant competitions at {}", kept.len(), url),
        )
        .await;

        {
            let mut state = self.state.lock();
            state.results.extend(kept);
        }
        self.bump(StatKey::Success).await;
    }

    /// 产生一条运行日志并通知观察者
    async fn emit(&self, level: LogLevel, message: impl Into<String>) {
        let event = LogEvent::new(level, message);
        match event.level {
            LogLevel::Error => tracing::error!("{}", event.message),
            LogLevel::Warning => tracing::warn!("{}", event.message),
            _ => tracing::info!("{}", event.message),
        }

        {
            let mut state = self.state.lock();
            state.log.push(event.clone());
        }
        for observer in &self.observers {
            observer.on_log(&event).await;
        }
    }

    /// 递增统计计数器并通知观察者
    async fn bump(&self, key: StatKey) {
        {
            let mut state = self.state.lock();
            state.stats.increment(key);
        }
        for observer in &self.observers {
            observer.on_stat(key, 1).await;
        }
    }
}

/// URL列表去重，保留首次出现的插入顺序
fn dedup_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
