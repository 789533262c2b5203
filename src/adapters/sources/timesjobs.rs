use super::{
    absolute_link, collect_card, select_href, select_text, selector, truncate_chars, CardLimits,
};
use crate::domain::model::{RawJob, Source};
use crate::domain::ports::{CardBatch, SourceExtractor};
use crate::utils::error::{DigestError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub struct TimesJobsExtractor {
    origin: String,
    limits: CardLimits,
    card: Selector,
    title: Selector,
    company: Selector,
    snippet: Selector,
}

impl TimesJobsExtractor {
    pub fn new(origin: String, limits: CardLimits) -> Self {
        Self {
            origin,
            limits,
            card: selector("li.job-bx"),
            title: selector("h2 a"),
            company: selector("h3.joblist-comp-name"),
            snippet: selector("ul.list-job-dtl"),
        }
    }

    fn read_card(&self, card: ElementRef<'_>) -> RawJob {
        RawJob {
            title: select_text(&card, &self.title),
            company: select_text(&card, &self.company),
            link: select_href(&card, &self.title).and_then(|h| absolute_link(&self.origin, h)),
            snippet: select_text(&card, &self.snippet)
                .map(|s| truncate_chars(&s, self.limits.snippet_max_chars))
                .unwrap_or_default(),
        }
    }
}

impl SourceExtractor for TimesJobsExtractor {
    fn source(&self) -> Source {
        Source::TimesJobs
    }

    fn search_url(&self, keyword: &str) -> Result<String> {
        let mut url = Url::parse(&format!("{}/candidate/job-search.html", self.origin)).map_err(
            |e| DigestError::InvalidConfigValueError {
                field: "http.origins.timesjobs".to_string(),
                value: self.origin.clone(),
                reason: e.to_string(),
            },
        )?;
        url.query_pairs_mut()
            .append_pair("searchType", "personalizedSearch")
            .append_pair("from", "submit")
            .append_pair("txtKeywords", keyword);
        Ok(url.to_string())
    }

    fn extract(&self, html: &str) -> CardBatch {
        let document = Html::parse_document(html);
        let cards: Vec<_> = document.select(&self.card).collect();
        tracing::debug!("✔ TimesJobs cards found: {}", cards.len());

        let mut batch = CardBatch::default();
        for card in cards.into_iter().take(self.limits.max_cards) {
            let raw = self.read_card(card);
            collect_card(&mut batch, Source::TimesJobs, raw);
        }
        batch
    }
}
