// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 固定延迟限速器
///
/// 在每个URL抓取前无条件暂停一段固定时间，不参考历史请求记录。
/// 串行爬取加固定间隔构成对目标站点的礼貌节奏。
pub struct RateLimiter {
    /// 每次抓取前的固定延迟
    delay: Duration,
}

impl RateLimiter {
    /// 创建新的限速器实例
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 执行一次延迟等待
    ///
    /// # 返回值
    ///
    /// 等待完整结束返回true；等待期间取消令牌触发则提前返回false，
    /// 调用方应在URL边界退出而不再产生副作用
    pub async fn wait(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(self.delay) => true,
            _ = cancel.cancelled() => false,
        }
    }
}
