//! Timestamp formats used by the timestamp context producer

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

/// How a captured timestamp is written into the context stack
///
/// # Examples
///
/// ```
/// use logweave::TimestampFormat;
/// use chrono::Utc;
///
/// let stamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
    /// `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,
    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,
    /// Seconds since the Unix epoch
    Unix,
    /// Milliseconds since the Unix epoch
    UnixMillis,
    /// Any strftime-compatible format string
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // An invalid format string falls back to ISO 8601
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Iso8601.format(datetime),
                }
            }
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

/// Parses the names accepted in `LOGWEAVE_TIMESTAMP`; anything containing a
/// `%` is taken as a custom strftime format.
impl FromStr for TimestampFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('%') {
            if StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
                return Err(format!("Invalid strftime format: '{}'", s));
            }
            return Ok(TimestampFormat::Custom(s.to_string()));
        }
        match s.to_lowercase().as_str() {
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601micros" | "iso8601-micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unixmillis" | "unix-millis" => Ok(TimestampFormat::UnixMillis),
            _ => Err(format!("Invalid timestamp format: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_formats() {
        assert_eq!(TimestampFormat::Iso8601.format(&fixed_datetime()), "2025-01-08T10:30:45.123Z");
        assert_eq!(
            TimestampFormat::Iso8601Micros.format(&fixed_datetime()),
            "2025-01-08T10:30:45.123456Z"
        );
    }

    #[test]
    fn test_unix_formats() {
        let seconds: i64 = TimestampFormat::Unix.format(&fixed_datetime()).parse().unwrap();
        let millis: i64 = TimestampFormat::UnixMillis.format(&fixed_datetime()).parse().unwrap();
        assert_eq!(millis / 1000, seconds);
        assert!(TimestampFormat::Unix.is_numeric());
        assert!(!TimestampFormat::Rfc3339.is_numeric());
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");

        let broken = TimestampFormat::Custom("%Q".to_string());
        assert_eq!(broken.format(&fixed_datetime()), "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_parse() {
        assert_eq!("RFC3339".parse::<TimestampFormat>(), Ok(TimestampFormat::Rfc3339));
        assert_eq!(
            "%H:%M".parse::<TimestampFormat>(),
            Ok(TimestampFormat::Custom("%H:%M".to_string()))
        );
        assert!("sundial".parse::<TimestampFormat>().is_err());
        assert!("%Q %H".parse::<TimestampFormat>().is_err());
    }
}
