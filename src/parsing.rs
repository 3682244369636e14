//! Distance and time text parsing
//!
//! Distances: a plain number is meters, a trailing `m` or `mi` means miles
//! and `k` or `km` means kilometers (`"3.1m"` is 3.1 miles). Times: `s`,
//! `m:s` or `h:m:s`, where only the last segment may be fractional.

use crate::error::ParseError;
use crate::models::{Distance, Duration, PerformanceRecord, METERS_PER_MILE};

fn invalid_time(input: &str, reason: impl Into<String>) -> ParseError {
    ParseError::InvalidTime {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Parse distance text into a [`Distance`]
pub fn parse_distance(input: &str) -> Result<Distance, ParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ParseError::MissingInput {
            field: "distance".to_string(),
        });
    }

    let lower = text.to_ascii_lowercase();
    let (number, scale) = if let Some(n) = lower.strip_suffix("km") {
        (n, 1000.0)
    } else if let Some(n) = lower.strip_suffix("mi") {
        (n, METERS_PER_MILE)
    } else if let Some(n) = lower.strip_suffix('m') {
        (n, METERS_PER_MILE)
    } else if let Some(n) = lower.strip_suffix('k') {
        (n, 1000.0)
    } else {
        (lower.as_str(), 1.0)
    };

    let invalid = || ParseError::InvalidDistance {
        input: text.to_string(),
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    Distance::meters(value * scale).map_err(|_| invalid())
}

/// Parse `s`, `m:s` or `h:m:s` text into a [`Duration`]
pub fn parse_time(input: &str) -> Result<Duration, ParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ParseError::MissingInput {
            field: "time".to_string(),
        });
    }

    let segments: Vec<&str> = text.split(':').collect();
    if segments.len() > 3 {
        return Err(invalid_time(text, "expected s, m:s or h:m:s"));
    }

    let last = segments.len() - 1;
    let mut total = 0.0;

    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.trim();
        let value: f64 = segment
            .parse()
            .map_err(|_| invalid_time(text, format!("'{}' is not a number", segment)))?;

        if !value.is_finite() || value < 0.0 {
            return Err(invalid_time(text, format!("'{}' is not a non-negative number", segment)));
        }
        if i < last && value.fract() != 0.0 {
            return Err(invalid_time(text, "only the last segment may be fractional"));
        }
        if i > 0 && value >= 60.0 {
            return Err(invalid_time(text, format!("'{}' must be below 60", segment)));
        }

        total = total * 60.0 + value;
    }

    Duration::seconds(total).map_err(|_| invalid_time(text, "time must be greater than zero"))
}

/// Parse a known performance from distance and time text
pub fn parse_performance(distance: &str, time: &str) -> Result<PerformanceRecord, ParseError> {
    Ok(PerformanceRecord::new(
        parse_distance(distance)?,
        parse_time(time)?,
    ))
}

/// Render seconds as `hh:mm:ss`, truncating fractions; hours do not wrap at 24
pub fn format_hms(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let secs = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number_is_meters() {
        assert_eq!(parse_distance("5000").unwrap().as_meters(), 5000.0);
        assert_eq!(parse_distance("  42195 ").unwrap().as_meters(), 42195.0);
        assert_eq!(parse_distance("1609.344").unwrap().as_meters(), 1609.344);
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(parse_distance("1m").unwrap().as_meters(), METERS_PER_MILE);
        assert_eq!(parse_distance("26.2mi").unwrap().as_meters(), 26.2 * METERS_PER_MILE);
        assert_eq!(parse_distance("10k").unwrap().as_meters(), 10000.0);
        assert!((parse_distance("21.0975 km").unwrap().as_meters() - 21097.5).abs() < 1e-6);
        assert_eq!(parse_distance("5KM").unwrap().as_meters(), 5000.0);
    }

    #[test]
    fn test_bad_distances() {
        assert_eq!(
            parse_distance("   "),
            Err(ParseError::MissingInput {
                field: "distance".to_string()
            })
        );
        for bad in ["abc", "m", "-400", "0", "5000*2", "__import__('os')", "nan"] {
            assert!(
                matches!(parse_distance(bad), Err(ParseError::InvalidDistance { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_time_forms() {
        assert_eq!(parse_time("45").unwrap().as_seconds(), 45.0);
        assert_eq!(parse_time("20:00").unwrap().as_seconds(), 1200.0);
        assert_eq!(parse_time("1:02:03").unwrap().as_seconds(), 3723.0);
        assert!((parse_time("3:59.4").unwrap().as_seconds() - 239.4).abs() < 1e-9);
        assert_eq!(parse_time("125").unwrap().as_seconds(), 125.0);
        assert_eq!(parse_time("100:00").unwrap().as_seconds(), 6000.0);
    }

    #[test]
    fn test_bad_times() {
        assert!(matches!(parse_time(""), Err(ParseError::MissingInput { .. })));
        for bad in ["1:2:3:4", "1:60", "1:00:75", "1.5:00", "a:b", "1::2", "0", "0:00", "-5"] {
            assert!(
                matches!(parse_time(bad), Err(ParseError::InvalidTime { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0.0), "00:00:00");
        assert_eq!(format_hms(1140.9), "00:19:00");
        assert_eq!(format_hms(3723.0), "01:02:03");
        assert_eq!(format_hms(90000.0), "25:00:00");
    }

    #[test]
    fn test_parse_then_format() {
        for text in ["00:20:00", "01:02:03", "02:59:59"] {
            let time = parse_time(text).unwrap();
            assert_eq!(format_hms(time.as_seconds()), text);
        }

        let record = parse_performance("10k", "40:00").unwrap();
        assert_eq!(record.distance.as_meters(), 10000.0);
        assert_eq!(record.duration.as_seconds(), 2400.0);
    }
}
