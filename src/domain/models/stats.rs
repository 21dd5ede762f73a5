// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 统计增量键枚举
///
/// 标识一次计数器增量作用于哪个计数器，total在运行开始时固定，
/// 不通过增量更新
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    /// 成功处理的URL
    Success,
    /// 抓取失败的URL
    Failed,
    /// 因礼貌策略跳过的URL
    Skipped,
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatKey::Success => write!(f, "success"),
            StatKey::Failed => write!(f, "failed"),
            StatKey::Skipped => write!(f, "skipped"),
        }
    }
}

/// 运行统计
///
/// 一次运行的四个非负计数器。total在运行开始时设定为入队URL数，
/// 其余计数器在运行期间单调不减，运行开始时全部归零。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    /// 本次运行入队的URL总数
    pub total: u32,
    /// 成功计数
    pub success: u32,
    /// 失败计数
    pub failed: u32,
    /// 跳过计数
    pub skipped: u32,
}

impl CrawlStats {
    /// 为一次新运行重置统计
    pub fn for_run(total: u32) -> Self {
        Self {
            total,
            success: 0,
            failed: 0,
            skipped: 0,
        }
    }

    /// 按增量键递增对应计数器
    pub fn increment(&mut self, key: StatKey) {
        match key {
            StatKey::Success => self.success += 1,
            StatKey::Failed => self.failed += 1,
            StatKey::Skipped => self.skipped += 1,
        }
    }

    /// 已进入终态的URL数量
    pub fn processed(&self) -> u32 {
        self.success + self.failed + self.skipped
    }
}
