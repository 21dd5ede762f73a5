// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 赛事记录（competition）：从页面提取的单条CTF赛事信息
/// - 日志事件（log_event）：带时间戳和严重级别的运行日志条目
/// - 运行（run）：一次爬取运行的状态和最终报告
/// - 统计（stats）：运行期间的计数器及其增量键
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为。
pub mod competition;
pub mod log_event;
pub mod run;
pub mod stats;
