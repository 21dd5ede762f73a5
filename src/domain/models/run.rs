// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;
use crate::domain::models::stats::CrawlStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 运行状态枚举
///
/// 表示一次爬取运行在其生命周期中的不同状态。
/// 状态转换遵循以下流程：
/// Idle → Running → Completed/Cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// 空闲
    #[default]
    Idle,
    /// 运行中
    Running,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

/// 将运行状态格式化为字符串表示
///
/// 用于日志记录和状态显示
impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunStatus::Idle => write!(f, "idle"),
            RunStatus::Running => write!(f, "running"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// 从字符串解析运行状态
impl FromStr for RunStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(RunStatus::Idle),
            "running" => Ok(RunStatus::Running),
            "completed" => Ok(RunStatus::Completed),
            "cancelled" => Ok(RunStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 爬取运行报告
///
/// 一次运行结束（自然完成或被取消）后由编排器返回的最终快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// 运行唯一标识符
    pub run_id: Uuid,
    /// 终态，Completed或Cancelled
    pub status: RunStatus,
    /// 最终统计
    pub stats: CrawlStats,
    /// 按提取顺序累积的赛事记录
    pub competitions: Vec<Competition>,
}
