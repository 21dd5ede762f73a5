// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化遥测
///
/// 日志级别通过RUST_LOG控制；设置CTFSCOUT_LOG_JSON后输出JSON格式，
/// 便于被日志收集器摄取
pub fn init_telemetry() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,ctfscout=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("CTFSCOUT_LOG_JSON").is_ok() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
