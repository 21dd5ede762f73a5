// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括爬取节奏、HTTP超时和地域过滤等配置
pub mod settings;
