use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TITLE_PLACEHOLDER: &str = "No title";
pub const COMPANY_PLACEHOLDER: &str = "Unknown";

/// 產生職缺的求職網站
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Indeed,
    Internshala,
    TimesJobs,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Indeed, Source::Internshala, Source::TimesJobs];

    pub fn label(&self) -> &'static str {
        match self {
            Source::Indeed => "Indeed",
            Source::Internshala => "Internshala",
            Source::TimesJobs => "TimesJobs",
        }
    }

    /// 設定檔與 origins 覆寫使用的小寫鍵
    pub fn key(&self) -> &'static str {
        match self {
            Source::Indeed => "indeed",
            Source::Internshala => "internshala",
            Source::TimesJobs => "timesjobs",
        }
    }

    pub fn default_origin(&self) -> &'static str {
        match self {
            Source::Indeed => "https://in.indeed.com",
            Source::Internshala => "https://internshala.com",
            Source::TimesJobs => "https://www.timesjobs.com",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown source '{}'", s))
    }
}

/// 通知期分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum NoticeLabel {
    Immediate,
    Days(u16),
    NotStated,
}

impl NoticeLabel {
    pub fn is_ninety_days(&self) -> bool {
        matches!(self, NoticeLabel::Days(90))
    }
}

impl fmt::Display for NoticeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLabel::Immediate => f.write_str("Immediate"),
            NoticeLabel::Days(n) => write!(f, "{} days", n),
            NoticeLabel::NotStated => f.write_str("Not stated"),
        }
    }
}

impl From<NoticeLabel> for String {
    fn from(label: NoticeLabel) -> Self {
        label.to_string()
    }
}

/// 單張卡片擷取出的原始欄位，尚未分類
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub link: Option<String>,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub source: Source,
    pub keyword: Option<String>,
    pub title: String,
    pub company: String,
    pub link: Option<String>,
    pub snippet: String,
    pub notice: NoticeLabel,
}

impl JobRecord {
    /// 由原始卡片建立記錄，缺少的欄位填入預設值並分類通知期
    pub fn from_raw(source: Source, keyword: Option<&str>, raw: RawJob) -> Self {
        let notice = crate::core::classifier::classify_notice(Some(&raw.snippet));
        Self {
            source,
            keyword: keyword.map(str::to_string),
            title: raw
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
            company: raw
                .company
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| COMPANY_PLACEHOLDER.to_string()),
            link: raw.link,
            snippet: raw.snippet,
            notice,
        }
    }
}

/// 單一 來源 × 關鍵字 擷取的明確結果
#[derive(Debug, Clone)]
pub enum ExtractOutcome {
    Fetched {
        source: Source,
        keyword: String,
        records: usize,
        skipped_cards: usize,
    },
    Failed {
        source: Source,
        keyword: String,
        reason: String,
    },
}

impl ExtractOutcome {
    pub fn source(&self) -> Source {
        match self {
            ExtractOutcome::Fetched { source, .. } | ExtractOutcome::Failed { source, .. } => {
                *source
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub outcomes: Vec<ExtractOutcome>,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ExtractOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn skipped_cards(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                ExtractOutcome::Fetched { skipped_cards, .. } => *skipped_cards,
                ExtractOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn log(&self) {
        for outcome in &self.outcomes {
            match outcome {
                ExtractOutcome::Fetched {
                    source,
                    keyword,
                    records,
                    skipped_cards,
                } => tracing::info!(
                    "✔ {} [{}]: {} jobs ({} cards skipped)",
                    source,
                    keyword,
                    records,
                    skipped_cards
                ),
                ExtractOutcome::Failed {
                    source,
                    keyword,
                    reason,
                } => tracing::warn!("❌ {} [{}]: {}", source, keyword, reason),
            }
        }
    }
}

/// 渲染完成、可寄送的摘要
#[derive(Debug, Clone)]
pub struct RenderedDigest {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<JobRecord>,
    pub summary: RunSummary,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<JobRecord>,
    pub digest: RenderedDigest,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub digest_path: String,
    pub delivered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_str() {
        assert_eq!("Indeed".parse::<Source>().unwrap(), Source::Indeed);
        assert_eq!(" timesjobs ".parse::<Source>().unwrap(), Source::TimesJobs);
        assert!("linkedin".parse::<Source>().is_err());
    }

    #[test]
    fn test_notice_label_display() {
        assert_eq!(NoticeLabel::Immediate.to_string(), "Immediate");
        assert_eq!(NoticeLabel::Days(90).to_string(), "90 days");
        assert_eq!(NoticeLabel::Days(7).to_string(), "7 days");
        assert_eq!(NoticeLabel::NotStated.to_string(), "Not stated");
        assert!(NoticeLabel::Days(90).is_ninety_days());
        assert!(!NoticeLabel::Days(190).is_ninety_days());
    }

    #[test]
    fn test_from_raw_fills_placeholders() {
        let raw = RawJob {
            title: None,
            company: Some("   ".to_string()),
            link: None,
            snippet: "Join ASAP".to_string(),
        };
        let record = JobRecord::from_raw(Source::Internshala, Some("rust"), raw);
        assert_eq!(record.title, TITLE_PLACEHOLDER);
        assert_eq!(record.company, COMPANY_PLACEHOLDER);
        assert_eq!(record.keyword.as_deref(), Some("rust"));
        assert_eq!(record.notice, NoticeLabel::Immediate);
    }

    #[test]
    fn test_record_serializes_notice_as_text() {
        let raw = RawJob {
            title: Some("Backend Engineer".to_string()),
            company: Some("Acme".to_string()),
            link: Some("https://in.indeed.com/viewjob?jk=1".to_string()),
            snippet: "Notice period 90 days".to_string(),
        };
        let record = JobRecord::from_raw(Source::Indeed, None, raw);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["notice"], "90 days");
        assert_eq!(json["source"], "indeed");
        assert!(json["keyword"].is_null());
    }

    #[test]
    fn test_run_summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(ExtractOutcome::Fetched {
            source: Source::Indeed,
            keyword: "java".to_string(),
            records: 4,
            skipped_cards: 2,
        });
        summary.record(ExtractOutcome::Failed {
            source: Source::TimesJobs,
            keyword: "java".to_string(),
            reason: "timeout".to_string(),
        });
        assert_eq!(summary.failures(), 1);
        assert_eq!(summary.skipped_cards(), 2);
        assert_eq!(summary.outcomes[1].source(), Source::TimesJobs);
    }
}
