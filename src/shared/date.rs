use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the inauguration dates the backend hands out. Accepts plain ISO
/// dates, naive datetimes and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Long form date for popups, the raw text when it does not parse.
pub fn format_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "N/A".into();
    }
    match parse_date(raw) {
        Some(date) => date.format("%-d %B %Y").to_string(),
        None => raw.to_string(),
    }
}

#[test]
fn format_iso_date_test() {
    assert_eq!(format_date("1924-12-30"), "30 December 1924");
}

#[test]
fn format_datetime_test() {
    assert_eq!(format_date("1975-07-21T00:00:00"), "21 July 1975");
    assert_eq!(format_date("2009-06-27T00:00:00+02:00"), "27 June 2009");
}

#[test]
fn format_unparsed_test() {
    assert_eq!(format_date("early 1920s"), "early 1920s");
    assert_eq!(format_date(""), "N/A");
}
