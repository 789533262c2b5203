use super::{absolute_link, collect_card, select_href, select_text, selector, truncate_chars, CardLimits};
use crate::domain::model::{RawJob, Source};
use crate::domain::ports::{CardBatch, SourceExtractor};
use crate::utils::error::{DigestError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub struct IndeedExtractor {
    origin: String,
    limits: CardLimits,
    card: Selector,
    beacon_card: Selector,
    title: Selector,
    title_link: Selector,
    company: Selector,
    snippet: Selector,
}

impl IndeedExtractor {
    pub fn new(origin: String, limits: CardLimits) -> Self {
        Self {
            origin,
            limits,
            card: selector("a.tapItem"),
            // 新版版面沒有 tapItem 錨點
            beacon_card: selector("div.job_seen_beacon"),
            title: selector("h2.jobTitle span"),
            title_link: selector("h2.jobTitle a"),
            company: selector(".companyName, [data-testid='company-name']"),
            snippet: selector(".job-snippet"),
        }
    }

    fn read_card(&self, card: ElementRef<'_>) -> RawJob {
        let href = card
            .value()
            .attr("href")
            .or_else(|| select_href(&card, &self.title_link));

        RawJob {
            title: select_text(&card, &self.title),
            company: select_text(&card, &self.company),
            link: href.and_then(|h| absolute_link(&self.origin, h)),
            snippet: select_text(&card, &self.snippet)
                .map(|s| truncate_chars(&s, self.limits.snippet_max_chars))
                .unwrap_or_default(),
        }
    }
}

impl SourceExtractor for IndeedExtractor {
    fn source(&self) -> Source {
        Source::Indeed
    }

    fn search_url(&self, keyword: &str) -> Result<String> {
        let mut url = Url::parse(&format!("{}/jobs", self.origin)).map_err(|e| {
            DigestError::InvalidConfigValueError {
                field: "http.origins.indeed".to_string(),
                value: self.origin.clone(),
                reason: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("l", "");
        Ok(url.to_string())
    }

    fn extract(&self, html: &str) -> CardBatch {
        let document = Html::parse_document(html);

        let mut cards: Vec<_> = document.select(&self.card).collect();
        if cards.is_empty() {
            cards = document.select(&self.beacon_card).collect();
        }
        tracing::debug!("✔ Indeed cards found: {}", cards.len());

        let mut batch = CardBatch::default();
        for card in cards.into_iter().take(self.limits.max_cards) {
            let raw = self.read_card(card);
            collect_card(&mut batch, Source::Indeed, raw);
        }
        batch
    }
}
