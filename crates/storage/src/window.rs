//! Trailing observation window

use crate::StorageError;
use chrono::{Days, NaiveDate};

/// ISO date format used by the `measurement.date` column
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing observation window in days
pub const TRAILING_WINDOW_DAYS: u64 = 365;

/// Compute the inclusive lower bound of the trailing year ending at `latest`.
///
/// The window is anchored on the newest date in the dataset, not on today.
pub fn trailing_year_cutoff(latest: &str) -> Result<String, StorageError> {
    let latest = NaiveDate::parse_from_str(latest, DATE_FORMAT)
        .map_err(|e| StorageError::InvalidDate(format!("{latest}: {e}")))?;

    let cutoff = latest
        .checked_sub_days(Days::new(TRAILING_WINDOW_DAYS))
        .ok_or_else(|| StorageError::InvalidDate(format!("{latest}: window underflow")))?;

    Ok(cutoff.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_is_365_days_back() {
        assert_eq!(trailing_year_cutoff("2017-08-23").unwrap(), "2016-08-23");
    }

    #[test]
    fn test_cutoff_across_leap_day() {
        // 2016 is a leap year, so 365 days back lands one day later
        assert_eq!(trailing_year_cutoff("2016-12-31").unwrap(), "2016-01-01");
        assert_eq!(trailing_year_cutoff("2017-03-01").unwrap(), "2016-03-01");
    }

    #[test]
    fn test_cutoff_rejects_malformed_date() {
        let err = trailing_year_cutoff("23/08/2017").unwrap_err();
        assert!(matches!(err, StorageError::InvalidDate(_)));
    }
}
