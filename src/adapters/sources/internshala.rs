use super::{
    absolute_link, collapse_whitespace, collect_card, select_text, selector, truncate_chars,
    CardLimits,
};
use crate::domain::model::{RawJob, Source};
use crate::domain::ports::{CardBatch, SourceExtractor};
use crate::utils::error::Result;
use scraper::{ElementRef, Html, Selector};

pub struct InternshalaExtractor {
    origin: String,
    limits: CardLimits,
    card: Selector,
    anchor: Selector,
    company: Selector,
}

impl InternshalaExtractor {
    pub fn new(origin: String, limits: CardLimits) -> Self {
        Self {
            origin,
            limits,
            card: selector(".internship_meta"),
            anchor: selector("a"),
            company: selector(".company_name"),
        }
    }

    fn read_card(&self, card: ElementRef<'_>) -> RawJob {
        let anchor = card.select(&self.anchor).next();

        let title = anchor
            .map(|a| collapse_whitespace(a.text()))
            .filter(|t| !t.is_empty());
        let link = anchor
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| absolute_link(&self.origin, href));

        // 卡片沒有獨立摘要欄位，取整張卡片文字
        let snippet = truncate_chars(
            &collapse_whitespace(card.text()),
            self.limits.snippet_max_chars,
        );

        RawJob {
            title,
            company: select_text(&card, &self.company),
            link,
            snippet,
        }
    }
}

impl SourceExtractor for InternshalaExtractor {
    fn source(&self) -> Source {
        Source::Internshala
    }

    fn search_url(&self, keyword: &str) -> Result<String> {
        Ok(format!(
            "{}/internships/keyword-{}",
            self.origin,
            urlencoding::encode(keyword)
        ))
    }

    fn extract(&self, html: &str) -> CardBatch {
        let document = Html::parse_document(html);
        let cards: Vec<_> = document.select(&self.card).collect();
        tracing::debug!("✔ Internshala cards found: {}", cards.len());

        let mut batch = CardBatch::default();
        for card in cards.into_iter().take(self.limits.max_cards) {
            let raw = self.read_card(card);
            collect_card(&mut batch, Source::Internshala, raw);
        }
        batch
    }
}
