//! Time utilities: parsing and formatting HH:MM times of day.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Blank input means "no time recorded".
pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    match input {
        Some(s) if !s.trim().is_empty() => {
            let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
            Ok(Some(t))
        }
        _ => Ok(None),
    }
}

pub fn format_time(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_time_is_none() {
        assert_eq!(parse_optional_time(None).unwrap(), None);
        assert_eq!(parse_optional_time(Some(&"  ".to_string())).unwrap(), None);
    }

    #[test]
    fn invalid_time_is_rejected() {
        let err = parse_optional_time(Some(&"25:99".to_string())).unwrap_err();
        assert!(matches!(err, AppError::InvalidTime(_)));
    }

    #[test]
    fn time_round_trips_through_format() {
        let t = parse_time("07:05");
        assert_eq!(format_time(t), "07:05");
        assert_eq!(format_time(None), "");
    }
}
