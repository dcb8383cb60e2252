use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// A meeting as supplied by the record store.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "meeting_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MeetingRecord {
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Titled body blocks in print order. Absent fields are kept as `None`
    /// so the section renderer decides what gets skipped.
    pub fn sections(&self) -> [Section<'_>; 3] {
        [
            Section {
                title: "Dagordning",
                content: self.agenda.as_deref(),
            },
            Section {
                title: "Anteckningar",
                content: self.notes.as_deref(),
            },
            Section {
                title: "Protokoll",
                content: self.protocol.as_deref(),
            },
        ]
    }

    pub fn heading(&self) -> String {
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("möte");
        format!("Protokoll för {title}")
    }

    pub fn date_line(&self) -> String {
        match self.date {
            Some(d) => format!("Datum: {}", d.format("%Y-%m-%d")),
            None => "Datum: Ej angivet".to_string(),
        }
    }

    pub fn created_label(&self, offset: FixedOffset) -> String {
        self.created_at
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp.
fn meeting_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(d)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(serde::de::Error::custom)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Section<'a> {
    pub title: &'a str,
    pub content: Option<&'a str>,
}

impl Section<'_> {
    pub fn is_empty(&self) -> bool {
        self.content.is_none_or(|c| c.trim().is_empty())
    }
}

// Same set JavaScript's encodeURIComponent leaves untouched.
const FILENAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encoded `<title>.pdf`, falling back to `meeting.pdf`.
pub fn export_filename(title: Option<&str>) -> String {
    let stem = title.filter(|t| !t.trim().is_empty()).unwrap_or("meeting");
    utf8_percent_encode(&format!("{stem}.pdf"), FILENAME_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> MeetingRecord {
        MeetingRecord::from_json(json.as_bytes()).unwrap()
    }

    #[test]
    fn parses_camel_case_record_with_missing_fields() {
        let r = record(r#"{"title":"Styrelsemöte","createdAt":"2024-05-01T12:30:00Z"}"#);
        assert_eq!(r.title.as_deref(), Some("Styrelsemöte"));
        assert!(r.agenda.is_none());
        assert!(r.date.is_none());
        assert_eq!(r.date_line(), "Datum: Ej angivet");
    }

    #[test]
    fn date_accepts_plain_dates_and_timestamps() {
        let plain = record(r#"{"date":"2024-05-01","createdAt":"2024-05-01T12:30:00Z"}"#);
        let stamp = record(r#"{"date":"2024-05-01T00:00:00.000Z","createdAt":"2024-05-01T12:30:00Z"}"#);
        let null = record(r#"{"date":null,"createdAt":"2024-05-01T12:30:00Z"}"#);
        assert_eq!(plain.date_line(), "Datum: 2024-05-01");
        assert_eq!(stamp.date, plain.date);
        assert!(null.date.is_none());
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let json = r#"{"date":"igår","createdAt":"2024-05-01T12:30:00Z"}"#;
        assert!(MeetingRecord::from_json(json.as_bytes()).is_err());
        assert!(MeetingRecord::from_json(br#"{"date":"igar","createdAt":"2024-05-01T12:30:00Z"}"#).is_err());
    }

    #[test]
    fn missing_created_at_is_rejected() {
        assert!(MeetingRecord::from_json(br#"{"title":"x"}"#).is_err());
    }

    #[test]
    fn heading_falls_back_for_blank_title() {
        let r = record(r#"{"title":"  ","createdAt":"2024-05-01T12:30:00Z"}"#);
        assert_eq!(r.heading(), "Protokoll för möte");
    }

    #[test]
    fn created_label_uses_offset() {
        let r = record(r#"{"createdAt":"2024-05-01T22:30:00Z"}"#);
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(r.created_label(cest), "2024-05-02 00:30:00");
    }

    #[test]
    fn blank_sections_count_as_empty() {
        let r = record(r#"{"agenda":"\n  \n","notes":"x","createdAt":"2024-05-01T12:30:00Z"}"#);
        let sections = r.sections();
        assert!(sections[0].is_empty());
        assert!(!sections[1].is_empty());
        assert!(sections[2].is_empty());
    }

    #[test]
    fn filename_is_percent_encoded() {
        assert_eq!(export_filename(Some("Styrelsemöte")), "Styrelsem%C3%B6te.pdf");
        assert_eq!(export_filename(Some("Q1 (plan)")), "Q1%20(plan).pdf");
        assert_eq!(export_filename(None), "meeting.pdf");
    }
}
