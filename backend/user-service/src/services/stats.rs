/// Registration statistics period handling
use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{AppError, Result};

/// Reporting window for registration counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPeriod {
    Week,
    Month,
    Year,
}

impl StatsPeriod {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_uppercase().as_str() {
            "WEEK" => Ok(StatsPeriod::Week),
            "MONTH" => Ok(StatsPeriod::Month),
            "YEAR" => Ok(StatsPeriod::Year),
            other => Err(AppError::BadRequest(format!(
                "unknown filter_by value: {other}"
            ))),
        }
    }
}

/// Resolve the inclusive date range ending today for a reporting window.
///
/// The only endpoint that validates start-after-end; the derived start can
/// never actually exceed today, but the guard is kept at the boundary.
pub fn resolve_range(period: StatsPeriod, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = match period {
        StatsPeriod::Week => {
            today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
        }
        StatsPeriod::Month => today
            .with_day(1)
            .ok_or_else(|| AppError::Internal("invalid month start".to_string()))?,
        StatsPeriod::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1)
            .ok_or_else(|| AppError::Internal("invalid year start".to_string()))?,
    };

    if start > today {
        return Err(AppError::BadRequest(
            "invalid start and ending date".to_string(),
        ));
    }

    Ok((start, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(StatsPeriod::parse("week").unwrap(), StatsPeriod::Week);
        assert_eq!(StatsPeriod::parse("Month").unwrap(), StatsPeriod::Month);
        assert!(StatsPeriod::parse("DECADE").is_err());
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-03-07 is a Thursday
        let (start, end) = resolve_range(StatsPeriod::Week, date(2024, 3, 7)).unwrap();
        assert_eq!(start, date(2024, 3, 4));
        assert_eq!(end, date(2024, 3, 7));
    }

    #[test]
    fn week_on_monday_is_a_single_day() {
        let (start, end) = resolve_range(StatsPeriod::Week, date(2024, 3, 4)).unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn month_starts_on_the_first() {
        let (start, end) = resolve_range(StatsPeriod::Month, date(2024, 3, 7)).unwrap();
        assert_eq!(start, date(2024, 3, 1));
        assert_eq!(end, date(2024, 3, 7));
    }

    #[test]
    fn year_starts_in_january() {
        let (start, _) = resolve_range(StatsPeriod::Year, date(2024, 3, 7)).unwrap();
        assert_eq!(start, date(2024, 1, 1));
    }
}
