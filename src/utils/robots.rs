// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::USER_AGENT;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// robots.txt资源的探测结果
///
/// 当前设计只检查资源是否存在，不解析或执行其中的规则；
/// 三种结果的区分只用于运行日志审计
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyPresence {
    /// robots.txt可获取
    Present,
    /// 站点返回非成功状态，视为不存在
    Absent,
    /// 探测请求本身失败（网络故障、非法URL或取消）
    Unreachable(String),
}

/// 礼貌检查结论
///
/// 检查器对任何输入都会解析出一个结论，从不向调用方抛错。
/// `allowed`为false的拒绝结论为未来更严格的策略保留，
/// 当前实现的所有路径都返回允许。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtesyVerdict {
    /// 是否允许抓取目标URL
    pub allowed: bool,
    /// 实际探测的robots.txt地址，目标URL无法解析时为None
    pub policy_url: Option<String>,
    /// 探测结果
    pub presence: PolicyPresence,
}

/// 礼貌检查器接口
#[async_trait]
pub trait CourtesyCheck: Send + Sync {
    /// 检查目标URL所在站点是否允许自动访问
    async fn check(&self, url: &str, cancel: &CancellationToken) -> CourtesyVerdict;
}

/// 礼貌检查器
///
/// 向目标URL源站的/robots.txt发送一个轻量HEAD请求，
/// 只判断资源是否存在
pub struct CourtesyChecker {
    /// 探测请求超时时间
    timeout: Duration,
}

impl Default for CourtesyChecker {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl CourtesyChecker {
    /// 创建新的礼貌检查器实例
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CourtesyCheck for CourtesyChecker {
    async fn check(&self, url: &str, cancel: &CancellationToken) -> CourtesyVerdict {
        let policy_url = match Url::parse(url) {
            Ok(parsed) => format!("{}/robots.txt", parsed.origin().ascii_serialization()),
            Err(e) => {
                return CourtesyVerdict {
                    allowed: true,
                    policy_url: None,
                    presence: PolicyPresence::Unreachable(e.to_string()),
                }
            }
        };

        let presence = match reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
        {
            Ok(client) => {
                // HEAD is enough, the body is never inspected
                let result = tokio::select! {
                    result = client.head(&policy_url).send() => result,
                    _ = cancel.cancelled() => {
                        return CourtesyVerdict {
                            allowed: true,
                            policy_url: Some(policy_url),
                            presence: PolicyPresence::Unreachable("request cancelled".to_string()),
                        }
                    }
                };

                match result {
                    Ok(response) if response.status().is_success() => PolicyPresence::Present,
                    Ok(_) => PolicyPresence::Absent,
                    Err(e) => PolicyPresence::Unreachable(e.to_string()),
                }
            }
            Err(e) => PolicyPresence::Unreachable(e.to_string()),
        };

        debug!(policy_url = %policy_url, presence = ?presence, "courtesy check resolved");

        CourtesyVerdict {
            allowed: true,
            policy_url: Some(policy_url),
            presence,
        }
    }
}
