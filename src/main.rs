// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use ctfscout::config::settings::Settings;
use ctfscout::domain::services::crawl_service::CrawlService;
use ctfscout::export::csv;
use ctfscout::utils::telemetry;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化组件、读取目标列表并驱动一次爬取运行
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting ctfscout...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Read the target URL list
    let urls = read_url_list(Path::new(&settings.crawler.url_file))?;
    if urls.is_empty() {
        anyhow::bail!(
            "no target URLs found in {}",
            settings.crawler.url_file
        );
    }
    info!(
        "Loaded {} target URLs from {}",
        urls.len(),
        settings.crawler.url_file
    );

    // 4. Build the crawl pipeline
    let service = Arc::new(CrawlService::new(&settings));

    // 5. Wire Ctrl-C to cooperative cancellation
    let cancel_handle = service.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_handle.cancel();
        }
    });

    // 6. Run the crawl
    let report = service.start(urls).await?;
    info!(
        "Run {} finished with status '{}': total={} success={} failed={} skipped={}",
        report.run_id,
        report.status,
        report.stats.total,
        report.stats.success,
        report.stats.failed,
        report.stats.skipped
    );

    // 7. Export results
    let output_path = csv::default_export_path(Path::new(&settings.crawler.output_dir));
    if csv::export_to_csv(&report.competitions, &output_path)? {
        info!("Results exported to {}", output_path.display());
    }

    Ok(())
}

/// 读取目标URL列表文件
///
/// 忽略空行和以#开头的注释行，不做去重，去重由编排器负责
fn read_url_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list from {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
