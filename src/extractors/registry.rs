// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;
use crate::extractors::ctftime::CtftimeStrategy;
use crate::extractors::generic::GenericStrategy;
use crate::extractors::traits::ExtractionStrategy;
use tracing::debug;

/// 提取策略注册表
///
/// 按注册顺序对来源URL做模式匹配，第一个命中的策略负责提取。
/// 新增站点策略只需注册，不需要修改分发逻辑。
pub struct ExtractorRegistry {
    /// 策略列表，通用回退策略排在最后
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(vec![Box::new(CtftimeStrategy), Box::new(GenericStrategy)])
    }
}

impl ExtractorRegistry {
    /// 使用给定的策略列表创建注册表
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// 提取赛事记录
    ///
    /// # 参数
    ///
    /// * `html` - 页面原始HTML
    /// * `url` - 来源URL，用于策略选择和链接解析
    ///
    /// # 返回值
    ///
    /// 有序的赛事记录序列，可能为空
    pub fn extract(&self, html: &str, url: &str) -> Vec<Competition> {
        for strategy in &self.strategies {
            if strategy.matches(url) {
                debug!(strategy = strategy.name(), url = %url, "extraction strategy selected");
                return strategy.extract(html, url);
            }
        }

        Vec::new()
    }
}
