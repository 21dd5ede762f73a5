// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、领域服务和爬取编排逻辑
pub mod domain;

/// 引擎模块
///
/// 实现HTTP抓取引擎及其取消语义
pub mod engines;

/// 提取器模块
///
/// 从HTML内容中提取赛事记录的策略注册表
pub mod extractors;

/// 导出模块
///
/// 将爬取结果导出为分隔文本格式
pub mod export;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
