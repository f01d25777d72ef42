use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

/// Record timestamp, parsed when possible and kept verbatim otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Parsed(DateTime<FixedOffset>),
    Raw(String),
}

impl Timestamp {
    /// Parse RFC 3339 or naive ISO-8601 (assumed UTC); never fails
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Self::Parsed(parsed);
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self::Parsed(naive.and_utc().fixed_offset());
            }
        }
        Self::Raw(raw.to_string())
    }

    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Parsed(dt) => Some(*dt),
            Self::Raw(_) => None,
        }
    }

    /// Human-friendly age relative to `now`; raw values pass through unchanged
    pub fn relative(&self, now: DateTime<Utc>) -> String {
        let parsed = match self {
            Self::Parsed(dt) => dt.with_timezone(&Utc),
            Self::Raw(raw) => return raw.clone(),
        };

        let elapsed = now.signed_duration_since(parsed);
        let minutes = elapsed.num_minutes();
        let hours = elapsed.num_hours();
        let days = elapsed.num_days();

        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{minutes} minutes ago")
        } else if hours < 24 {
            format!("{hours} hours ago")
        } else if days < 7 {
            format!("{days} days ago")
        } else {
            parsed.format("%Y-%m-%d").to_string()
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parsed(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_rfc3339_and_python_isoformat() {
        assert!(matches!(Timestamp::parse("2024-06-15T10:00:00+08:00"), Timestamp::Parsed(_)));
        assert!(matches!(Timestamp::parse("2024-06-15T10:00:00.123456"), Timestamp::Parsed(_)));
        assert!(matches!(Timestamp::parse("2024-06-15 10:00:00"), Timestamp::Parsed(_)));
    }

    #[test]
    fn unparsable_values_pass_through() {
        let ts = Timestamp::parse("yesterday-ish");
        assert_eq!(ts, Timestamp::Raw("yesterday-ish".to_string()));
        assert_eq!(ts.relative(now()), "yesterday-ish");
        assert_eq!(ts.to_string(), "yesterday-ish");
    }

    #[test]
    fn relative_buckets() {
        let at = |d: Duration| Timestamp::Parsed((now() - d).fixed_offset());
        assert_eq!(at(Duration::seconds(20)).relative(now()), "just now");
        assert_eq!(at(Duration::minutes(5)).relative(now()), "5 minutes ago");
        assert_eq!(at(Duration::hours(3)).relative(now()), "3 hours ago");
        assert_eq!(at(Duration::days(2)).relative(now()), "2 days ago");
        assert_eq!(at(Duration::days(30)).relative(now()), "2024-05-16");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let ts = Timestamp::Parsed((now() + Duration::hours(1)).fixed_offset());
        assert_eq!(ts.relative(now()), "just now");
    }
}
