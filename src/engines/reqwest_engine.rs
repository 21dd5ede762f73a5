// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::{FetchEngine, FetchError, FetchRequest};
use async_trait::async_trait;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 对外声明的客户端标识
///
/// 按礼貌惯例如实标注工具名、版本、所属机构和联系邮箱，
/// 使站点运营者可以识别并联系到本爬虫的负责人
pub const USER_AGENT: &str = concat!(
    "ctfscout/",
    env!("CARGO_PKG_VERSION"),
    " (Rhode Island College Institute of Cybersecurity; Contact: mrodriguez_2986@email.ric.edu)"
);

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，对每个URL只尝试一次，
/// 不做重试或退避
pub struct ReqwestEngine;

#[async_trait]
impl FetchEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    /// * `cancel` - 取消令牌，触发后进行中的请求立即中止
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 成功状态下的响应正文
    /// * `Err(FetchError)` - 非成功状态、传输失败或取消
    async fn fetch(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<String, FetchError> {
        // Each request gets a fresh client for cookie isolation
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request.timeout)
            .build()?;

        let start = Instant::now();

        // Race the request against the cancellation token so an in-flight
        // fetch aborts promptly instead of waiting for the transport timeout
        let response = tokio::select! {
            result = client.get(&request.url).send() => result?,
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = tokio::select! {
            result = response.text() => result?,
            _ = cancel.cancelled() => return Err(FetchError::Cancelled),
        };

        debug!(
            url = %request.url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fetch completed"
        );

        Ok(body)
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}
