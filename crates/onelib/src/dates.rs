//! Date helpers
//!
//! Anything implementing [`IntoDateTime`] is accepted: chrono date-times,
//! epoch milliseconds, and RFC 3339 / ISO date strings.

use std::time::SystemTime;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc,
};

use crate::error::{Error, Result};

/// Template used by [`format_default`]
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Conversion into a zoned date-time.
///
/// chrono values keep their own zone; epoch milliseconds and strings
/// without an offset are read in local time; date-only strings mean
/// midnight UTC.
pub trait IntoDateTime {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>>;
}

impl<Tz: TimeZone> IntoDateTime for DateTime<Tz> {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        let offset = self.offset().fix();
        Ok(self.with_timezone(&offset))
    }
}

impl<Tz: TimeZone> IntoDateTime for &DateTime<Tz> {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        self.clone().into_date_time()
    }
}

impl IntoDateTime for i64 {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        Local
            .timestamp_millis_opt(self)
            .single()
            .ok_or_else(|| Error::InvalidDate(format!("{} ms is out of range", self)))?
            .into_date_time()
    }
}

impl IntoDateTime for SystemTime {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        DateTime::<Local>::from(self).into_date_time()
    }
}

impl IntoDateTime for &str {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        let text = self.trim();

        if let Ok(date) = DateTime::parse_from_rfc3339(text) {
            return Ok(date);
        }
        for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
                return Local
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(|| Error::InvalidDate(text.to_string()))?
                    .into_date_time();
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Utc.from_utc_datetime(&midnight).into_date_time();
            }
        }

        Err(Error::InvalidDate(text.to_string()))
    }
}

impl IntoDateTime for &String {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        self.as_str().into_date_time()
    }
}

impl IntoDateTime for String {
    fn into_date_time(self) -> Result<DateTime<FixedOffset>> {
        self.as_str().into_date_time()
    }
}

/// Current local date-time
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Current time as milliseconds since the Unix epoch
pub fn timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Relative description of how long ago `date` was
pub fn since(date: impl IntoDateTime) -> Result<String> {
    since_at(date, Utc::now())
}

/// [`since`] measured against an explicit "now".
///
/// Elapsed whole seconds are bucketed: under a minute is "just now", then
/// minutes, hours, and days, each floored. Dates in the future are "just now".
pub fn since_at<Tz: TimeZone>(date: impl IntoDateTime, now: DateTime<Tz>) -> Result<String> {
    let date = date.into_date_time()?;
    let elapsed_ms = now.timestamp_millis() - date.timestamp_millis();
    let seconds = elapsed_ms.div_euclid(1000);

    Ok(if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{} hours ago", seconds / 3_600)
    } else {
        format!("{} days ago", seconds / 86_400)
    })
}

/// Render `date` through a token template.
///
/// `YYYY`, `MM`, `DD`, `HH` and `mm` are each replaced once, at their first
/// occurrence in the template; later occurrences stay literal. Fields are
/// read in the date's own zone.
pub fn format(date: impl IntoDateTime, template: &str) -> Result<String> {
    let date = date.into_date_time()?;
    let values = [
        ("YYYY", date.year().to_string()),
        ("MM", format!("{:02}", date.month())),
        ("DD", format!("{:02}", date.day())),
        ("HH", format!("{:02}", date.hour())),
        ("mm", format!("{:02}", date.minute())),
    ];

    // (start, end, replacement), matched against the template text only
    let mut claims: Vec<(usize, usize, &str)> = Vec::with_capacity(values.len());
    for (token, value) in &values {
        let free = template.match_indices(token).map(|(i, _)| i).find(|&i| {
            claims
                .iter()
                .all(|&(start, end, _)| i + token.len() <= start || i >= end)
        });
        if let Some(start) = free {
            claims.push((start, start + token.len(), value.as_str()));
        }
    }
    claims.sort_by_key(|&(start, _, _)| start);

    let mut output = String::with_capacity(template.len() + 8);
    let mut cursor = 0;
    for (start, end, value) in claims {
        output.push_str(&template[cursor..start]);
        output.push_str(value);
        cursor = end;
    }
    output.push_str(&template[cursor..]);
    Ok(output)
}

/// [`format`] with [`DEFAULT_DATE_FORMAT`]
pub fn format_default(date: impl IntoDateTime) -> Result<String> {
    format(date, DEFAULT_DATE_FORMAT)
}
