// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;
use crate::extractors::traits::ExtractionStrategy;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"tr[id^="event_id_"]"#).unwrap());
static NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td:nth-child(1) a").unwrap());
static DATES_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td:nth-child(2)").unwrap());
static FORMAT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("td:nth-child(3)").unwrap());
static LOCATION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td:nth-child(4)").unwrap());

/// ctftime.org站点提取策略
///
/// ctftime的赛事列表是逐行的表格结构：第一列是名称和详情链接，
/// 第二列是日期，第三列是赛制，第四列是地点。
/// 缺少名称单元格的行被跳过，缺失的可选字段使用声明的占位文本。
pub struct CtftimeStrategy;

impl CtftimeStrategy {
    /// 提取单元格文本，为空时使用占位文本
    fn cell_text(row: ElementRef, selector: &Selector, placeholder: &str) -> String {
        let text = row
            .select(selector)
            .next()
            .map(|cell| {
                cell.text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();

        if text.is_empty() {
            placeholder.to_string()
        } else {
            text
        }
    }

    /// 解析详情链接
    ///
    /// 相对链接基于来源URL解析为绝对地址；没有链接或解析失败时
    /// 回退到来源URL本身
    fn detail_url(anchor: ElementRef, source_url: &str) -> String {
        anchor
            .value()
            .attr("href")
            .and_then(|href| {
                Url::parse(source_url)
                    .and_then(|base| base.join(href))
                    .ok()
            })
            .map(|resolved| resolved.to_string())
            .unwrap_or_else(|| source_url.to_string())
    }
}

impl ExtractionStrategy for CtftimeStrategy {
    fn matches(&self, url: &str) -> bool {
        url.contains("ctftime.org")
    }

    fn extract(&self, html: &str, url: &str) -> Vec<Competition> {
        let document = Html::parse_document(html);
        let mut competitions = Vec::new();

        for row in document.select(&ROW_SELECTOR) {
            // Rows without a name anchor are not events
            let Some(anchor) = row.select(&NAME_SELECTOR).next() else {
                continue;
            };

            let name = anchor
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();

            competitions.push(Competition {
                name,
                dates: Self::cell_text(row, &DATES_SELECTOR, "TBD"),
                fees: "Check event page".to_string(),
                requirements: "Check event page".to_string(),
                notes: String::new(),
                event_type: Self::cell_text(row, &FORMAT_SELECTOR, "Unknown"),
                age_group: "General".to_string(),
                location: Self::cell_text(row, &LOCATION_SELECTOR, "Unknown"),
                url: Self::detail_url(anchor, url),
            });
        }

        competitions
    }

    fn name(&self) -> &'static str {
        "ctftime"
    }
}

#[cfg(test)]
#[path = "ctftime_test.rs"]
mod tests;
