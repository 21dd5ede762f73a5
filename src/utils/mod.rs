// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
/// 包括robots.txt礼貌检查、固定延迟限速和遥测初始化
pub mod rate_limit;
pub mod robots;
pub mod telemetry;
