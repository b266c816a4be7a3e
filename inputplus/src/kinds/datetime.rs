//! Dates and times parsed against an ordered list of `strftime` formats.
//! The first format that parses the whole answer wins.
//!
//! A format using `%Y` only accepts four digit years, so `10/21/19` falls
//! through to a later `%y` format instead of becoming the year 19.
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    error::ConfigError,
    utils::{Rejection, Validate},
};

pub const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m/%d/%y", "%Y/%m/%d", "%y/%m/%d", "%x"];

pub const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%y/%m/%d %H:%M:%S",
    "%x %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M",
    "%Y/%m/%d %H:%M",
    "%y/%m/%d %H:%M",
    "%x %H:%M",
];

pub const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%X"];

fn owned(formats: &[&str]) -> Vec<String> {
    formats.iter().map(|f| f.to_string()).collect()
}

fn check_formats(formats: &[String]) -> Result<(), ConfigError> {
    if formats.is_empty() {
        Err(ConfigError::NoFormats)
    } else {
        Ok(())
    }
}

fn four_digit_year(format: &str, year: i32) -> bool {
    !format.contains("%Y") || (1000..=9999).contains(&year)
}

macro_rules! format_kind {
    ($(#[$meta:meta])* $name:ident, $defaults:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            formats: Vec<String>,
        }

        impl $name {
            pub fn with_formats<I, S>(formats: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                $name {
                    formats: formats.into_iter().map(Into::into).collect(),
                }
            }

            pub fn formats(&self) -> &[String] {
                &self.formats
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name {
                    formats: owned($defaults),
                }
            }
        }
    };
}

format_kind!(
    /// A calendar date, returned as [`NaiveDate`].
    Date,
    DATE_FORMATS
);
format_kind!(
    /// A date and a time of day, returned as [`NaiveDateTime`].
    DateTime,
    DATETIME_FORMATS
);
format_kind!(
    /// A time of day, returned as [`NaiveTime`].
    Time,
    TIME_FORMATS
);

impl Validate for Date {
    type Output = NaiveDate;

    fn validate(&self, input: &str) -> Result<NaiveDate, Rejection> {
        self.formats
            .iter()
            .find_map(|format| {
                NaiveDate::parse_from_str(input, format)
                    .ok()
                    .filter(|date| four_digit_year(format, date.year()))
            })
            .ok_or_else(|| Rejection::InvalidDate(input.to_string()))
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        check_formats(&self.formats)
    }
}

impl Validate for DateTime {
    type Output = NaiveDateTime;

    fn validate(&self, input: &str) -> Result<NaiveDateTime, Rejection> {
        self.formats
            .iter()
            .find_map(|format| {
                NaiveDateTime::parse_from_str(input, format)
                    .ok()
                    .filter(|dt| four_digit_year(format, dt.year()))
            })
            .ok_or_else(|| Rejection::InvalidDateTime(input.to_string()))
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        check_formats(&self.formats)
    }
}

impl Validate for Time {
    type Output = NaiveTime;

    fn validate(&self, input: &str) -> Result<NaiveTime, Rejection> {
        self.formats
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(input, format).ok())
            .ok_or_else(|| Rejection::InvalidTime(input.to_string()))
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        check_formats(&self.formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_default_formats() {
        let date = Date::default();
        let expected = NaiveDate::from_ymd_opt(2019, 10, 21).unwrap();
        assert_eq!(date.validate("10/21/2019"), Ok(expected));
        assert_eq!(date.validate("10/21/19"), Ok(expected));
        assert_eq!(date.validate("2019/10/21"), Ok(expected));
        assert_eq!(
            date.validate("Oct 2019").unwrap_err().to_string(),
            "'Oct 2019' is not a valid date."
        );
        assert!(date.validate("02/30/2019").is_err());
    }

    #[test]
    fn test_date_custom_formats_first_match_wins() {
        let date = Date::with_formats(["%d.%m.%Y", "%m.%d.%Y"]);
        assert_eq!(
            date.validate("01.02.2020"),
            Ok(NaiveDate::from_ymd_opt(2020, 2, 1).unwrap())
        );
        assert_eq!(
            date.validate("01.13.2020"),
            Ok(NaiveDate::from_ymd_opt(2020, 1, 13).unwrap())
        );
    }

    #[test]
    fn test_datetime_default_formats() {
        let dt = DateTime::default();
        let expected = NaiveDate::from_ymd_opt(2019, 10, 21)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        assert_eq!(dt.validate("10/21/2019 13:45:00"), Ok(expected));
        assert_eq!(dt.validate("2019/10/21 13:45"), Ok(expected));
        assert_eq!(
            dt.validate("10/21/2019").unwrap_err().to_string(),
            "'10/21/2019' is not a valid date and time."
        );
    }

    #[test]
    fn test_time_default_formats() {
        let time = Time::default();
        assert_eq!(
            time.validate("13:45:07"),
            Ok(NaiveTime::from_hms_opt(13, 45, 7).unwrap())
        );
        assert_eq!(
            time.validate("9:05"),
            Ok(NaiveTime::from_hms_opt(9, 5, 0).unwrap())
        );
        assert_eq!(
            time.validate("25:00").unwrap_err().to_string(),
            "'25:00' is not a valid time."
        );
    }

    #[test]
    fn test_empty_format_list_is_config_error() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            Time::with_formats(empty).check_config(),
            Err(ConfigError::NoFormats)
        ));
        assert!(Date::default().check_config().is_ok());
    }
}
