//! Formatting helpers for phone numbers, scores and assessment dates

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Strip every non-digit character from a phone number
#[must_use]
pub fn normalize_phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Format a phone number for display
///
/// Ten digits render as `(123) 456-7890`, eleven digits with a leading `1`
/// as `+1 (123) 456-7890`. Anything else is returned unchanged.
#[must_use]
pub fn format_phone_number(phone: &str) -> String {
    let digits = normalize_phone_digits(phone);
    let national = match digits.len() {
        10 => Some(("", digits.as_str())),
        11 => digits.strip_prefix('1').map(|rest| ("+1 ", rest)),
        _ => None,
    };

    national
        .and_then(|(prefix, n)| {
            let (area, rest) = n.split_at_checked(3)?;
            let (exchange, line) = rest.split_at_checked(3)?;
            Some(format!("{prefix}({area}) {exchange}-{line}"))
        })
        .unwrap_or_else(|| phone.to_string())
}

/// Score bands used to colour assessment scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// 80 and above
    Strong,
    /// 60 to 79
    Moderate,
    /// Below 60
    Weak,
}

impl ScoreBand {
    /// Classify a 0-100 score
    #[must_use]
    pub const fn from_score(score: i32) -> Self {
        if score >= 80 {
            Self::Strong
        } else if score >= 60 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Parse an assessment timestamp
///
/// Accepts RFC 3339 (offset converted to UTC), ISO-8601 without offset, the
/// backend's `YYYY-MM-DD HH:MM:SS` form and a bare date.
#[must_use]
pub fn parse_assessment_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Render an assessment timestamp as date and time, or echo the raw value
#[must_use]
pub fn format_assessment_date(raw: &str) -> String {
    parse_assessment_date(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}
