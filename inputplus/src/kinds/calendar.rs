//! Calendar names and days: [`Month`], [`DayOfWeek`] and [`DayOfMonth`].
use chrono::{NaiveDate, Weekday};

use crate::{
    error::ConfigError,
    utils::{Rejection, Validate, check_type},
};

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

/// A month given by name (`March`), abbreviation (`mar`) or number (`3`),
/// returned as its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Month;

impl Validate for Month {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let name = match input.parse::<u32>() {
            Ok(number) => month_name(number),
            Err(_) => input.parse::<chrono::Month>().ok().map(|m| m.name()),
        };

        name.map(str::to_string)
            .ok_or_else(|| Rejection::InvalidMonth(input.to_string()))
    }
}

/// A day of the week given by name or abbreviation, returned as its full
/// English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayOfWeek;

impl Validate for DayOfWeek {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        input
            .parse::<Weekday>()
            .map(|day| WEEKDAY_NAMES[day.num_days_from_monday() as usize].to_string())
            .map_err(|_| Rejection::InvalidDayOfWeek(input.to_string()))
    }
}

/// A day number that exists in the given month of the given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOfMonth {
    pub year: i32,
    pub month: u32,
}

impl DayOfMonth {
    pub fn new(year: i32, month: u32) -> Self {
        DayOfMonth { year, month }
    }
}

impl Validate for DayOfMonth {
    type Output = u32;

    fn validate(&self, input: &str) -> Result<u32, Rejection> {
        let reject = || Rejection::InvalidDayOfMonth {
            value: input.to_string(),
            month: month_name(self.month).unwrap_or("?"),
            year: self.year,
        };

        let day = check_type!(input, u32, reject())?;
        match NaiveDate::from_ymd_opt(self.year, self.month, day) {
            Some(_) => Ok(day),
            None => Err(reject()),
        }
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        match month_name(self.month) {
            Some(_) => Ok(()),
            None => Err(ConfigError::InvalidMonth(self.month)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_forms() {
        for input in ["3", "Mar", "MARCH", "march"] {
            assert_eq!(Month.validate(input), Ok("March".to_string()));
        }
        assert_eq!(Month.validate("12"), Ok("December".to_string()));
        assert!(Month.validate("13").is_err());
        assert_eq!(
            Month.validate("Marchy").unwrap_err().to_string(),
            "'Marchy' is not a month."
        );
    }

    #[test]
    fn test_day_of_week_forms() {
        assert_eq!(DayOfWeek.validate("mon"), Ok("Monday".to_string()));
        assert_eq!(DayOfWeek.validate("FRIDAY"), Ok("Friday".to_string()));
        assert_eq!(
            DayOfWeek.validate("funday").unwrap_err().to_string(),
            "'funday' is not a day of the week."
        );
    }

    #[test]
    fn test_day_of_month_leap_years() {
        assert_eq!(DayOfMonth::new(2019, 10).validate("31"), Ok(31));
        assert_eq!(DayOfMonth::new(2000, 2).validate("29"), Ok(29));
        assert_eq!(
            DayOfMonth::new(2001, 2).validate("29").unwrap_err().to_string(),
            "'29' is not a day in the month of February 2001"
        );
        assert!(DayOfMonth::new(2001, 2).validate("0").is_err());
        assert!(DayOfMonth::new(2001, 2).validate("first").is_err());
    }

    #[test]
    fn test_day_of_month_config() {
        assert!(matches!(
            DayOfMonth::new(2020, 13).check_config(),
            Err(ConfigError::InvalidMonth(13))
        ));
        assert!(DayOfMonth::new(2020, 1).check_config().is_ok());
    }
}
