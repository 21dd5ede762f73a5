// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含爬虫行为和相关性过滤等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 相关性过滤配置
    pub filter: FilterSettings,
}

/// 爬虫配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlerSettings {
    /// 每个URL抓取前的固定延迟（毫秒）
    pub delay_ms: u64,
    /// 单次HTTP请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// robots.txt探测请求的超时时间（秒）
    pub robots_timeout_secs: u64,
    /// 目标URL列表文件路径
    pub url_file: String,
    /// CSV导出目录
    pub output_dir: String,
}

/// 相关性过滤配置设置
#[derive(Debug, Deserialize)]
pub struct FilterSettings {
    /// 地域允许列表，记录的location字段包含任一子串即保留
    pub locations: Vec<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default crawler settings
            .set_default("crawler.delay_ms", 2000)?
            .set_default("crawler.request_timeout_secs", 30)?
            .set_default("crawler.robots_timeout_secs", 5)?
            .set_default("crawler.url_file", "urls.txt")?
            .set_default("crawler.output_dir", ".")?
            // Default relevance allow-list for the commissioning organization
            .set_default(
                "filter.locations",
                vec![
                    "online".to_string(),
                    "us".to_string(),
                    "united states".to_string(),
                    "america".to_string(),
                    "massachusetts".to_string(),
                    "rhode island".to_string(),
                    "connecticut".to_string(),
                ],
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CTFSCOUT").separator("__"));

        builder.build()?.try_deserialize()
    }
}
