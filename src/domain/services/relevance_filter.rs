// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;

/// 地域相关性过滤器
///
/// 对赛事记录的location字段做二元判定：小写化后包含允许列表中
/// 任一子串即保留，否则丢弃。不做部分打分。
/// 这是整个系统中唯一承载委托方地域相关性策略的位置。
pub struct RelevanceFilter {
    /// 允许列表，构造时统一转为小写
    tokens: Vec<String>,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(&[
            "online".to_string(),
            "us".to_string(),
            "united states".to_string(),
            "america".to_string(),
            "massachusetts".to_string(),
            "rhode island".to_string(),
            "connecticut".to_string(),
        ])
    }
}

impl RelevanceFilter {
    /// 使用给定的允许列表创建过滤器
    pub fn new(tokens: &[String]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// 判断单条记录是否相关
    pub fn is_relevant(&self, competition: &Competition) -> bool {
        let location = competition.location.to_lowercase();
        self.tokens.iter().any(|token| location.contains(token))
    }

    /// 过滤记录序列，保持原有顺序
    pub fn retain(&self, competitions: Vec<Competition>) -> Vec<Competition> {
        competitions
            .into_iter()
            .filter(|c| self.is_relevant(c))
            .collect()
    }
}
