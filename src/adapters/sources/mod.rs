//! Per-site search page extractors.
//!
//! Every job board implements [`SourceExtractor`]; [`extractor_for`] is the
//! static registry that maps a [`Source`] to its implementation.

mod indeed;
mod internshala;
mod timesjobs;

pub use indeed::IndeedExtractor;
pub use internshala::InternshalaExtractor;
pub use timesjobs::TimesJobsExtractor;

use crate::domain::model::{RawJob, Source};
use crate::domain::ports::{CardBatch, SourceExtractor};
use scraper::{ElementRef, Selector};
use url::Url;

/// 每頁最多讀取幾張卡片、摘要最多幾個字元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLimits {
    pub max_cards: usize,
    pub snippet_max_chars: usize,
}

pub fn extractor_for(source: Source, origin: &str, limits: CardLimits) -> Box<dyn SourceExtractor> {
    let origin = origin.trim_end_matches('/').to_string();
    match source {
        Source::Indeed => Box::new(IndeedExtractor::new(origin, limits)),
        Source::Internshala => Box::new(InternshalaExtractor::new(origin, limits)),
        Source::TimesJobs => Box::new(TimesJobsExtractor::new(origin, limits)),
    }
}

pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

/// 合併文字節點並壓縮空白
pub(crate) fn collapse_whitespace<'a, I>(pieces: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    pieces
        .into_iter()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn select_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(el.text()))
        .filter(|text| !text.is_empty())
}

pub(crate) fn select_href<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<&'a str> {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// 相對路徑一律以網站 origin 補成絕對網址
pub(crate) fn absolute_link(origin: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }

    if let Ok(url) = Url::parse(href) {
        return matches!(url.scheme(), "http" | "https").then(|| url.to_string());
    }

    Url::parse(origin)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .ok()
}

/// 沒有標題也沒有連結的卡片無法辨識，略過
pub(crate) fn collect_card(batch: &mut CardBatch, source: Source, raw: RawJob) {
    if raw.title.is_none() && raw.link.is_none() {
        tracing::debug!("⚠️ Skipping {} card without title or link", source);
        batch.skipped += 1;
        return;
    }
    batch.jobs.push(raw);
}
