// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 导出列顺序，与委托方约定的固定格式
pub const CSV_HEADERS: [&str; 9] = [
    "Name",
    "Dates",
    "Fees",
    "Requirements",
    "Notes",
    "Type",
    "Age Group",
    "Location",
    "URL",
];

/// 将结果集导出为CSV文件
///
/// 每个字段用双引号包裹并以逗号分隔，首行为表头，每条记录一行。
/// 字段内嵌的引号不做转义，这是与委托方约定格式的已知限制。
/// 空结果集不产生文件，只记录一条警告。
///
/// # 参数
///
/// * `results` - 赛事记录序列
/// * `path` - 输出文件路径
///
/// # 返回值
///
/// * `Ok(true)` - 文件已写入
/// * `Ok(false)` - 结果集为空，未写文件
/// * `Err(anyhow::Error)` - 文件写入失败
pub fn export_to_csv(results: &[Competition], path: &Path) -> Result<bool> {
    if results.is_empty() {
        warn!("No results to export");
        return Ok(false);
    }

    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for competition in results {
        let fields = [
            &competition.name,
            &competition.dates,
            &competition.fees,
            &competition.requirements,
            &competition.notes,
            &competition.event_type,
            &competition.age_group,
            &competition.location,
            &competition.url,
        ];
        lines.push(
            fields
                .iter()
                .map(|field| format!("\"{}\"", field))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    std::fs::write(path, lines.join("\n"))
        .with_context(|| format!("failed to write CSV to {}", path.display()))?;

    Ok(true)
}

/// 默认导出路径，文件名带当天日期
pub fn default_export_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "ctf_competitions_{}.csv",
        Utc::now().format("%Y-%m-%d")
    ))
}
