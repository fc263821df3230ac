/// Date-predicate resolution for the post filter
///
/// TODAY and a degenerate range (start == end) collapse to an exact
/// calendar-day match; a proper range becomes an inclusive day interval.
/// Start-after-end is deliberately not validated here.
use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::DateFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedDates {
    Exact(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

pub fn resolve_dates(
    filter: DateFilter,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Option<ResolvedDates>> {
    match filter {
        DateFilter::All => Ok(None),
        DateFilter::Today => Ok(Some(ResolvedDates::Exact(today))),
        DateFilter::Range => {
            let start = start.ok_or_else(|| {
                AppError::BadRequest("start_date is required for a RANGE filter".to_string())
            })?;
            let end = end.ok_or_else(|| {
                AppError::BadRequest("end_date is required for a RANGE filter".to_string())
            })?;

            if start == end {
                Ok(Some(ResolvedDates::Exact(start)))
            } else {
                Ok(Some(ResolvedDates::Between(start, end)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn all_resolves_to_no_predicate() {
        let resolved = resolve_dates(DateFilter::All, None, None, date(2024, 3, 7)).unwrap();
        assert_eq!(resolved, None);
    }

    #[test]
    fn today_resolves_to_exact_current_date() {
        let today = date(2024, 3, 7);
        let resolved = resolve_dates(DateFilter::Today, None, None, today).unwrap();
        assert_eq!(resolved, Some(ResolvedDates::Exact(today)));
    }

    #[test]
    fn today_ignores_supplied_dates() {
        let today = date(2024, 3, 7);
        let resolved = resolve_dates(
            DateFilter::Today,
            Some(date(2020, 1, 1)),
            Some(date(2020, 1, 2)),
            today,
        )
        .unwrap();
        assert_eq!(resolved, Some(ResolvedDates::Exact(today)));
    }

    #[test]
    fn degenerate_range_collapses_to_exact() {
        let day = date(2024, 2, 1);
        let resolved =
            resolve_dates(DateFilter::Range, Some(day), Some(day), date(2024, 3, 7)).unwrap();
        assert_eq!(resolved, Some(ResolvedDates::Exact(day)));
    }

    #[test]
    fn distinct_range_stays_a_range() {
        let resolved = resolve_dates(
            DateFilter::Range,
            Some(date(2024, 2, 1)),
            Some(date(2024, 2, 29)),
            date(2024, 3, 7),
        )
        .unwrap();
        assert_eq!(
            resolved,
            Some(ResolvedDates::Between(date(2024, 2, 1), date(2024, 2, 29)))
        );
    }

    #[test]
    fn inverted_range_is_not_rejected_here() {
        // Validation of start-after-end is out of scope for the filter.
        let resolved = resolve_dates(
            DateFilter::Range,
            Some(date(2024, 3, 1)),
            Some(date(2024, 2, 1)),
            date(2024, 3, 7),
        )
        .unwrap();
        assert_eq!(
            resolved,
            Some(ResolvedDates::Between(date(2024, 3, 1), date(2024, 2, 1)))
        );
    }

    #[test]
    fn range_without_bounds_is_rejected() {
        assert!(resolve_dates(DateFilter::Range, None, Some(date(2024, 2, 1)), date(2024, 3, 7))
            .is_err());
        assert!(resolve_dates(DateFilter::Range, Some(date(2024, 2, 1)), None, date(2024, 3, 7))
            .is_err());
    }
}
