use crate::domain::model::NoticeLabel;
use regex::Regex;
use std::sync::LazyLock;

// 涵蓋 "immediate", "immediately", "join immediately", "asap", "join asap"
static IMMEDIATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:immediate|immediately|asap)\b").expect("valid regex"));

static NINETY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b90\s*days?\b").expect("valid regex"));

static DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,3})\s*days?\b").expect("valid regex"));

/// 從職缺摘要判斷通知期
///
/// 優先順序：立即到職 > 90 天 > 任意 1-3 位數天數 > 未註明。
/// 比對前會將換行正規化為空白。
pub fn classify_notice(text: Option<&str>) -> NoticeLabel {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return NoticeLabel::NotStated,
    };

    let normalized = text.replace(['\r', '\n'], " ");

    if IMMEDIATE_RE.is_match(&normalized) {
        return NoticeLabel::Immediate;
    }

    if NINETY_RE.is_match(&normalized) {
        return NoticeLabel::Days(90);
    }

    DAYS_RE
        .captures_iter(&normalized)
        .filter_map(|caps| caps[1].parse::<u16>().ok())
        .find(|days| *days > 0)
        .map(NoticeLabel::Days)
        .unwrap_or(NoticeLabel::NotStated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_missing_text() {
        assert_eq!(classify_notice(None), NoticeLabel::NotStated);
        assert_eq!(classify_notice(Some("")), NoticeLabel::NotStated);
        assert_eq!(classify_notice(Some("  \n ")), NoticeLabel::NotStated);
    }

    #[test]
    fn test_asap_wins_in_any_casing() {
        for text in ["ASAP", "join asap", "Joining AsAp, notice 30 days", "90 days or ASAP"] {
            assert_eq!(classify_notice(Some(text)), NoticeLabel::Immediate, "{}", text);
        }
    }

    #[test]
    fn test_immediate_phrases() {
        assert_eq!(
            classify_notice(Some("Candidates who can join immediately")),
            NoticeLabel::Immediate
        );
        assert_eq!(classify_notice(Some("Immediate joiners preferred")), NoticeLabel::Immediate);
        // 只有完整單字才算
        assert_eq!(classify_notice(Some("immediateness")), NoticeLabel::NotStated);
        assert_eq!(classify_notice(Some("wasapp group")), NoticeLabel::NotStated);
    }

    #[test]
    fn test_ninety_days() {
        assert_eq!(classify_notice(Some("Notice period: 90 days")), NoticeLabel::Days(90));
        assert_eq!(classify_notice(Some("up to 90 Day notice")), NoticeLabel::Days(90));
        assert_eq!(classify_notice(Some("serving 90days")), NoticeLabel::Days(90));
        // 90 天優先於先出現的其他天數
        assert_eq!(
            classify_notice(Some("15 days preferred, 90 days max")),
            NoticeLabel::Days(90)
        );
    }

    #[test]
    fn test_ninety_inside_larger_number() {
        assert_eq!(classify_notice(Some("notice 190 days")), NoticeLabel::Days(190));
        assert!(!classify_notice(Some("notice 190 days")).is_ninety_days());
        assert_eq!(classify_notice(Some("founded 1900, days off")), NoticeLabel::NotStated);
        assert_eq!(classify_notice(Some("1900 days")), NoticeLabel::NotStated);
    }

    #[test]
    fn test_generic_day_count() {
        assert_eq!(classify_notice(Some("Notice: 45 days")), NoticeLabel::Days(45));
        assert_eq!(classify_notice(Some("1 day notice")), NoticeLabel::Days(1));
        assert_eq!(classify_notice(Some("notice of 007 days")), NoticeLabel::Days(7));
        assert_eq!(classify_notice(Some("0 days or 30 days")), NoticeLabel::Days(30));
    }

    #[test]
    fn test_line_breaks_are_normalized() {
        assert_eq!(classify_notice(Some("notice\n60\r\ndays")), NoticeLabel::Days(60));
    }

    #[test]
    fn test_no_false_positive_on_words() {
        assert_eq!(classify_notice(Some("Apply today")), NoticeLabel::NotStated);
        assert_eq!(classify_notice(Some("5 dayshift roles")), NoticeLabel::NotStated);
        assert_eq!(classify_notice(Some("Full stack Java role")), NoticeLabel::NotStated);
    }

    #[test]
    fn test_is_deterministic() {
        let text = "Notice: 30 days, hybrid";
        assert_eq!(classify_notice(Some(text)), classify_notice(Some(text)));
    }
}
