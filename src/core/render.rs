use crate::core::aggregate::group_by_source;
use crate::domain::model::{JobRecord, RenderedDigest};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write;

const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;
const NO_JOBS_MESSAGE: &str = "No jobs found today.";
const NINETY_DAYS_STYLE: &str = "background:#ff4d4d;color:white";
const DEFAULT_NOTICE_STYLE: &str = "background:#eee";

/// 將職缺渲染成 HTML 摘要與純文字備援內容
pub struct DigestRenderer<'a> {
    title: &'a str,
    group_by_source: bool,
}

impl<'a> DigestRenderer<'a> {
    pub fn new(title: &'a str, group_by_source: bool) -> Self {
        Self {
            title,
            group_by_source,
        }
    }

    pub fn subject(&self, generated_at: DateTime<FixedOffset>) -> String {
        format!("{} - {}", self.title, generated_at.format("%d %b %Y"))
    }

    pub fn render(&self, records: &[JobRecord], generated_at: DateTime<FixedOffset>) -> RenderedDigest {
        RenderedDigest {
            subject: self.subject(generated_at),
            html: self.render_html(records, generated_at),
            text: self.render_text(records, generated_at),
        }
    }

    pub fn render_html(&self, records: &[JobRecord], generated_at: DateTime<FixedOffset>) -> String {
        let mut body = String::new();

        if records.is_empty() {
            let _ = write!(body, r#"<p class="no-jobs">{}</p>"#, NO_JOBS_MESSAGE);
        } else if self.group_by_source {
            for (source, group) in group_by_source(records).iter() {
                let _ = write!(
                    body,
                    r#"
    <h3 class="source">{source} ({count})</h3>
    {table}"#,
                    source = source,
                    count = group.len(),
                    table = render_table(group),
                );
            }
        } else {
            body.push_str(&render_table(records));
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body style="font-family: Arial, Helvetica, sans-serif;">
    <h2>{title} - {timestamp}</h2>
    <p style="color:#666;">{count} unique jobs</p>
    {body}
</body>
</html>
"#,
            title = html_escape(self.title),
            timestamp = format_timestamp(generated_at),
            count = records.len(),
            body = body,
        )
    }

    pub fn render_text(&self, records: &[JobRecord], generated_at: DateTime<FixedOffset>) -> String {
        let mut text = format!("{} - {}\n\n", self.title, format_timestamp(generated_at));

        if records.is_empty() {
            text.push_str(NO_JOBS_MESSAGE);
            text.push('\n');
            return text;
        }

        for (source, group) in group_by_source(records).iter() {
            let _ = writeln!(text, "[{}]", source);
            for record in group {
                let _ = writeln!(
                    text,
                    "- {} | {} | Notice: {}",
                    record.title, record.company, record.notice
                );
                if let Some(link) = &record.link {
                    let _ = writeln!(text, "  {}", link);
                }
            }
            text.push('\n');
        }

        text
    }
}

fn render_table(records: &[JobRecord]) -> String {
    let mut rows = String::new();

    for record in records {
        let notice_style = if record.notice.is_ninety_days() {
            NINETY_DAYS_STYLE
        } else {
            DEFAULT_NOTICE_STYLE
        };

        let link = match &record.link {
            Some(link) if !link.is_empty() => {
                format!(r#"<a href="{}">Apply</a>"#, html_escape(link))
            }
            _ => r#"<span style="color:#999;">Link unavailable</span>"#.to_string(),
        };

        let keyword = record
            .keyword
            .as_deref()
            .map(|k| format!(r#"<br><small style="color:#666;">{}</small>"#, html_escape(k)))
            .unwrap_or_default();

        let _ = write!(
            rows,
            r#"
        <tr class="job-row">
            <td><b>{title}</b><br>{company}<br>{link}{keyword}</td>
            <td>{snippet}</td>
            <td><span class="notice" style="{notice_style};padding:4px;border-radius:4px">{notice}</span></td>
        </tr>"#,
            title = html_escape(&record.title),
            company = html_escape(&record.company),
            link = link,
            keyword = keyword,
            snippet = html_escape(&record.snippet),
            notice_style = notice_style,
            notice = record.notice,
        );
    }

    format!(
        r#"<table border="1" cellpadding="8" style="border-collapse:collapse;">
        <tr><th>Job</th><th>Description</th><th>Notice</th></tr>{rows}
    </table>"#,
        rows = rows
    )
}

fn format_timestamp(generated_at: DateTime<FixedOffset>) -> String {
    let zone = if generated_at.offset().local_minus_utc() == IST_OFFSET_SECONDS {
        "IST".to_string()
    } else {
        format!("UTC{}", generated_at.format("%:z"))
    };
    format!("{} {}", generated_at.format("%d %b %Y, %I:%M %p"), zone)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
