// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::log_event::LogEvent;
use crate::domain::models::stats::StatKey;
use async_trait::async_trait;

/// 爬取观察者接口
///
/// 展示层通过实现该接口实时消费运行日志和统计增量，
/// 编排器按产生顺序依次通知每个注册的观察者。
/// 所有方法默认无操作，实现方只需覆盖感兴趣的回调。
#[async_trait]
pub trait CrawlObserver: Send + Sync {
    /// 新的日志事件产生
    async fn on_log(&self, _event: &LogEvent) {}

    /// 统计计数器增量
    async fn on_stat(&self, _key: StatKey, _delta: u32) {}
}
