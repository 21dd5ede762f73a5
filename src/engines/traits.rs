// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 非成功HTTP状态码
    #[error("HTTP {status}")]
    Http {
        /// 响应状态码
        status: u16,
    },
    /// 传输层失败（DNS、超时、连接重置或非法URL）
    #[error("network error: {message}")]
    Network {
        /// 失败详情
        message: String,
    },
    /// 请求被取消
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// 判断错误是否为取消
    ///
    /// 取消不计入失败统计，也不作为错误日志上报
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network {
            message: err.to_string(),
        }
    }
}

/// 抓取请求
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 超时时间
    pub timeout: Duration,
}

/// 抓取引擎特质
///
/// 对单个URL执行一次HTTP GET并返回响应正文。
/// 实现必须在取消令牌触发时尽快中止进行中的请求。
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 执行抓取
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<String, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
