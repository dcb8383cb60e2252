#![allow(dead_code)]

use moteva_pdf::{MeetingRecord, PageSummary, RenderedPdf};

pub const CREATED_AT: &str = "2024-05-01T12:30:00Z";
pub const CREATED_LABEL: &str = "Skapad: 2024-05-01 12:30:00";
pub const WATERMARK: &str = "Moteva Confidential";

/// Body lines that fit on page 1 below the header, heading, date line and
/// one section title: baselines from 641.89 down to 80 at 16pt steps.
pub const FIRST_PAGE_LINES: usize = 36;
/// Body lines on an overflow page: baselines from 741.89 down to 80.
pub const CONTINUATION_PAGE_LINES: usize = 42;

pub fn record(json: &str) -> MeetingRecord {
    MeetingRecord::from_json(json.as_bytes()).expect("valid record json")
}

pub fn meeting(title: Option<&str>, agenda: Option<&str>) -> MeetingRecord {
    MeetingRecord {
        title: title.map(str::to_string),
        date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1),
        agenda: agenda.map(str::to_string),
        notes: None,
        protocol: None,
        created_at: CREATED_AT.parse().expect("valid timestamp"),
    }
}

/// A single paragraph that wraps to exactly `lines` lines at 90 columns:
/// every word is 90 chars, so each one fills a line by itself.
pub fn body_of_lines(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("{:x<90}", format!("rad{i}-")))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn count_on_page(page: &PageSummary, text: &str) -> usize {
    page.texts.iter().filter(|t| t.text == text).count()
}

pub fn body_lines_on_page(page: &PageSummary) -> usize {
    page.texts.iter().filter(|t| t.text.starts_with("rad")).count()
}

pub fn all_text(pdf: &RenderedPdf) -> Vec<Vec<String>> {
    pdf.pages
        .iter()
        .map(|p| p.texts.iter().map(|t| t.text.clone()).collect())
        .collect()
}
