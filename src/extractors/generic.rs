// Copyright (c) 2025 M. Rodriguez
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::competition::Competition;
use crate::extractors::traits::ExtractionStrategy;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// 触发保守提取的关键词集合，大小写不敏感的子串匹配
const CTF_KEYWORDS: [&str; 3] = ["ctf", "capture the flag", "cybersecurity competition"];

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// 通用回退提取策略
///
/// 对未知站点只做保守处理：在页面可见文本中发现任一关键词时，
/// 以页面标题为名称产出恰好一条待人工核实的记录，否则不产出。
/// 结构化字段全部使用占位文本，避免从任意页面伪造结构化数据。
pub struct GenericStrategy;

impl GenericStrategy {
    fn page_text(document: &Html) -> String {
        let root = document
            .select(&BODY_SELECTOR)
            .next()
            .map(|body| body.text().collect::<Vec<_>>().join(" "))
            .unwrap_or_else(|| document.root_element().text().collect::<Vec<_>>().join(" "));
        root.to_lowercase()
    }

    fn page_title(document: &Html) -> String {
        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|t| t.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .unwrap_or_default();

        if title.is_empty() {
            "Untitled Competition".to_string()
        } else {
            title
        }
    }
}

impl ExtractionStrategy for GenericStrategy {
    /// 通用策略适用于任意URL，必须注册在所有站点策略之后
    fn matches(&self, _url: &str) -> bool {
        true
    }

    fn extract(&self, html: &str, url: &str) -> Vec<Competition> {
        let document = Html::parse_document(html);
        let text = Self::page_text(&document);

        if !CTF_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
            return Vec::new();
        }

        vec![Competition {
            name: Self::page_title(&document),
            dates: "Manual review needed".to_string(),
            fees: "Manual review needed".to_string(),
            requirements: "Manual review needed".to_string(),
            notes: "Generic extraction - manual verification recommended".to_string(),
            event_type: "Unknown".to_string(),
            age_group: "Unknown".to_string(),
            location: "Unknown".to_string(),
            url: url.to_string(),
        }]
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}
