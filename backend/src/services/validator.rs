//! Stateless validation rules for user operations.
//!
//! Holds the registration age-eligibility check and the birth-date range
//! ordering check. The minimum age threshold comes from configuration and
//! is injected at construction, never read from ambient state.

use chrono::{Datelike, NaiveDate, Utc};

use crate::errors::ApiError;

#[derive(Debug, Clone)]
pub struct UserValidator {
    minimum_age: i32,
}

impl UserValidator {
    pub fn new(minimum_age: i32) -> Self {
        Self { minimum_age }
    }

    /// Rejects registration when the computed age is below the minimum.
    pub fn validate_registration(&self, birth_date: NaiveDate) -> Result<(), ApiError> {
        let today = Utc::now().date_naive();
        if !is_of_age(birth_date, today, self.minimum_age) {
            return Err(ApiError::RegistrationRestriction);
        }
        Ok(())
    }

    /// Rejects inverted ranges; an empty or single-day range is valid.
    pub fn validate_birth_date_range(&self, from: NaiveDate, to: NaiveDate) -> Result<(), ApiError> {
        if from > to {
            return Err(ApiError::InvalidDateRange);
        }
        Ok(())
    }
}

/// Age is the calendar-year difference, not elapsed time: someone born on
/// December 31 counts a year older on the following January 1.
pub(crate) fn is_of_age(birth_date: NaiveDate, today: NaiveDate, minimum_age: i32) -> bool {
    today.year() - birth_date.year() >= minimum_age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn of_age_when_year_difference_meets_minimum() {
        assert!(is_of_age(date(1990, 2, 13), date(2024, 1, 1), 18));
    }

    #[test]
    fn under_age_when_year_difference_below_minimum() {
        assert!(!is_of_age(date(2014, 2, 13), date(2024, 1, 1), 18));
    }

    #[test]
    fn of_age_exactly_at_minimum() {
        assert!(is_of_age(date(2006, 6, 15), date(2024, 1, 1), 18));
        assert!(!is_of_age(date(2007, 6, 15), date(2024, 1, 1), 18));
    }

    #[test]
    fn year_difference_ignores_month_and_day() {
        // Born Dec 31, already counted a year older on Jan 1.
        assert!(is_of_age(date(1990, 12, 31), date(2024, 1, 1), 34));
    }

    #[test]
    fn registration_passes_for_adult() {
        let validator = UserValidator::new(18);
        let today = Utc::now().date_naive();
        let birth_date = date(today.year() - 30, 2, 13);

        assert!(validator.validate_registration(birth_date).is_ok());
    }

    #[test]
    fn registration_rejected_for_minor() {
        let validator = UserValidator::new(18);
        let today = Utc::now().date_naive();
        let birth_date = date(today.year() - 10, 2, 13);

        let err = validator.validate_registration(birth_date).unwrap_err();
        assert!(matches!(err, ApiError::RegistrationRestriction));
    }

    #[test]
    fn range_valid_when_ordered_or_equal() {
        let validator = UserValidator::new(18);

        assert!(validator
            .validate_birth_date_range(date(1990, 1, 1), date(1995, 12, 31))
            .is_ok());
        assert!(validator
            .validate_birth_date_range(date(1990, 1, 1), date(1990, 1, 1))
            .is_ok());
    }

    #[test]
    fn range_rejected_when_inverted() {
        let validator = UserValidator::new(18);

        let err = validator
            .validate_birth_date_range(date(1995, 1, 1), date(1990, 1, 1))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidDateRange));
    }
}
