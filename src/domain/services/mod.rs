// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含领域服务和业务规则，包括：
/// - 爬取服务（crawl_service）：驱动整条流水线的编排器
/// - 观察者（observer）：向展示层实时发布事件的回调接口
/// - 相关性过滤（relevance_filter)：地域允许列表过滤
pub mod crawl_service;
pub mod observer;
pub mod relevance_filter;
