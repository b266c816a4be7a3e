//! # Prompt kinds
//!
//! A kind is a value implementing [`Validate`]: it turns the working text of
//! an answer into a typed value or explains why it cannot. Kinds carry their
//! own parameters (bounds, choices, formats) and check them once through
//! [`Validate::check_config`] before anything is printed.
//!
//! | kind | output |
//! |---|---|
//! | [`Text`] | `String` |
//! | [`Custom`] | whatever the closure returns |
//! | [`Num`], [`Int`], [`Float`] | [`Number`], `i64`, `f64` |
//! | [`Bool`], [`YesNo`] | `bool`, `String` |
//! | [`Choice`], [`Menu`] | `String` |
//! | [`Date`], [`DateTime`], [`Time`] | `chrono` naive types |
//! | [`Email`], [`Filename`], [`Matches`], [`Zip`] | `String` |
//! | [`Url`] | [`ParsedUrl`](crate::utils::ParsedUrl) |
//! | [`Filepath`] | `PathBuf` |
//! | [`Ip`] | `IpAddr` |
//! | [`RegexStr`] | `regex::Regex` |
//! | [`Month`], [`DayOfWeek`], [`UsState`] | `String` |
//! | [`Password`] | `String`, read masked |
//! | [`DayOfMonth`] | `u32` |
use std::{fmt::Display, marker::PhantomData};

use crate::utils::{Rejection, Validate};

pub mod calendar;
pub use calendar::{DayOfMonth, DayOfWeek, Month};

pub mod choice;
pub use choice::{Choice, Menu, MenuStyle};

pub mod datetime;
pub use datetime::{Date, DateTime, Time};

pub mod number;
pub use number::{BoundValue, Bounds, Float, Int, Num, Number};

pub mod password;
pub use password::Password;

pub mod text;
pub use text::{Email, Filename, Filepath, Ip, Matches, RegexStr, Url, Zip};

pub mod us_state;
pub use us_state::UsState;

pub mod yes_no;
pub use yes_no::{Bool, YesNo};

/// Any text. Only the shared rules (blank, allow and block lists) apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Text;

impl Validate for Text {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        Ok(input.to_string())
    }
}

/// Validation delegated to a closure. An `Err` is shown to the user as is.
///
/// ```rust
/// use inputplus::kinds::Custom;
/// use inputplus::utils::Validate;
///
/// let even = Custom::new(|text: &str| match text.parse::<u32>() {
///     Ok(n) if n % 2 == 0 => Ok(n),
///     _ => Err("Please enter an even number."),
/// });
///
/// assert_eq!(even.validate("42"), Ok(42));
/// assert_eq!(
///     even.validate("7").unwrap_err().to_string(),
///     "Please enter an even number."
/// );
/// ```
pub struct Custom<F, T, E> {
    check: F,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> Custom<F, T, E>
where
    F: Fn(&str) -> Result<T, E>,
    E: Display,
{
    pub fn new(check: F) -> Self {
        Custom {
            check,
            _marker: PhantomData,
        }
    }
}

impl<F, T, E> Validate for Custom<F, T, E>
where
    F: Fn(&str) -> Result<T, E>,
    E: Display,
{
    type Output = T;

    fn validate(&self, input: &str) -> Result<T, Rejection> {
        (self.check)(input).map_err(|e| Rejection::Custom(e.to_string()))
    }
}
