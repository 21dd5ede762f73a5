// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;

/// 提取策略特质
///
/// 每个策略实现从(HTML, 来源URL)到零条或多条赛事记录的纯函数转换。
/// 已知且可信的站点使用结构化提取，其余站点走保守的单记录标记策略，
/// 避免从任意页面伪造结构化数据。
pub trait ExtractionStrategy: Send + Sync {
    /// 判断策略是否适用于该来源URL
    fn matches(&self, url: &str) -> bool;

    /// 提取赛事记录
    ///
    /// 纯函数：相同的(html, url)输入必须产生相同的记录序列
    fn extract(&self, html: &str, url: &str) -> Vec<Competition>;

    /// 策略名称
    fn name(&self) -> &'static str;
}
