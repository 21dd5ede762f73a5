// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// CTF赛事记录实体
///
/// 表示从单个页面提取的一条赛事信息。记录一旦产生即不可变；
/// 核心不强制唯一性约束，跨URL的重复记录会被原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competition {
    /// 赛事名称
    pub name: String,
    /// 日期范围（自由文本）
    pub dates: String,
    /// 费用说明
    pub fees: String,
    /// 参赛资格/要求
    pub requirements: String,
    /// 自由备注
    pub notes: String,
    /// 赛事类型/类别
    pub event_type: String,
    /// 年龄组标签
    pub age_group: String,
    /// 地点文本，相关性过滤的唯一依据
    pub location: String,
    /// 规范化的来源URL
    pub url: String,
}
