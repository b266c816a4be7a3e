//! # Input Sanitization & Prevalidation
//!
//! Every prompt kind shares the same front half of its validation pipeline:
//! strip the raw line, refuse blanks, let allowlisted answers straight through
//! and refuse blocklisted ones. [`Sanitize`] holds those compiled rules and
//! [`Sanitize::execute`] runs them, short-circuiting on the first decisive
//! match. What survives is handed to the kind-specific [`Validate`]
//! implementation.
//!
//! ## Rules, in order
//! 1. [`Strip`] produces the working text (whitespace by default).
//! 2. An empty working text is accepted as-is when blanks are allowed, and
//!    rejected with [`Rejection::Blank`] otherwise.
//! 3. An allowlist pattern matching the *whole* working text accepts it
//!    immediately, bypassing every later check. This is an escape hatch.
//! 4. A blocklist pattern found *anywhere* in the working text rejects it with
//!    the pattern's message, or `"This response is invalid."`.
//!
//! Both lists match case-insensitively.
//!
//! ## Example
//! ```rust
//! use inputplus::utils::{Sanitize, Screened, Strip};
//!
//! let rules = Sanitize::compile(
//!     false,
//!     Strip::Whitespace,
//!     &["xyzzy".to_string()],
//!     &[("moose".to_string(), Some("Try again".to_string()))],
//! )
//! .unwrap();
//!
//! assert_eq!(rules.execute("  xyzzy "), Ok(Screened::Allowed("xyzzy")));
//! assert_eq!(rules.execute("cat"), Ok(Screened::Checked("cat")));
//! assert_eq!(rules.execute("moose").unwrap_err().to_string(), "Try again");
//! ```
use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, utils::Echo};

/// Message used when a blocklist pattern carries no message of its own.
pub const DEFAULT_BLOCKLIST_RESPONSE: &str = "This response is invalid.";

/// Which characters are removed from both ends of the raw answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strip {
    /// Unicode whitespace.
    #[default]
    Whitespace,
    /// Any character contained in the set.
    Chars(String),
    /// Keep the answer untouched.
    Off,
}

impl Strip {
    pub fn apply<'a>(&self, input: &'a str) -> &'a str {
        match self {
            Strip::Whitespace => input.trim(),
            Strip::Chars(set) => input.trim_matches(|c: char| set.contains(c)),
            Strip::Off => input,
        }
    }
}

/// Why a single answer was refused.
///
/// The `Display` output is the exact message shown to the user before the
/// prompt is repeated. Shape failures (`NotANumber`, `InvalidChoice`, ...) are
/// kept apart from range failures (`BelowMinimum`, `NotLessThan`, ...).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("Blank values are not allowed.")]
    Blank,
    #[error("{0}")]
    Blocked(String),
    #[error("'{0}' is not a number.")]
    NotANumber(String),
    #[error("'{0}' is not an integer.")]
    NotAnInteger(String),
    #[error("'{0}' is too large to be stored as an integer.")]
    IntegerOutOfRange(String),
    #[error("Number must be at minimum {0}.")]
    BelowMinimum(f64),
    #[error("Number must be at maximum {0}.")]
    AboveMaximum(f64),
    #[error("Number must be greater than {0}.")]
    NotGreaterThan(f64),
    #[error("Number must be less than {0}.")]
    NotLessThan(f64),
    #[error("'{0}' is not a valid choice.")]
    InvalidChoice(String),
    #[error("'{value}' is not a valid {yes}/{no} response.")]
    InvalidYesNo {
        value: String,
        yes: String,
        no: String,
    },
    #[error("'{0}' is not a valid date.")]
    InvalidDate(String),
    #[error("'{0}' is not a valid date and time.")]
    InvalidDateTime(String),
    #[error("'{0}' is not a valid time.")]
    InvalidTime(String),
    #[error("'{0}' is not a valid email address.")]
    InvalidEmail(String),
    #[error("'{0}' is not a valid URL.")]
    InvalidUrl(String),
    #[error("'{0}' is not a valid file path.")]
    InvalidFilepath(String),
    #[error("'{0}' file not found.")]
    FileNotFound(String),
    #[error("'{0}' is not a valid filename.")]
    InvalidFilename(String),
    #[error("'{0}' is not a valid IP address.")]
    InvalidIp(String),
    #[error("'{0}' does not match the specified pattern.")]
    NoPatternMatch(String),
    #[error("'{0}' is not a valid regular expression.")]
    InvalidRegex(String),
    #[error("'{0}' is not a month.")]
    InvalidMonth(String),
    #[error("'{0}' is not a day of the week.")]
    InvalidDayOfWeek(String),
    #[error("'{value}' is not a day in the month of {month} {year}")]
    InvalidDayOfMonth {
        value: String,
        month: &'static str,
        year: i32,
    },
    #[error("'{0}' is not a state.")]
    InvalidUsState(String),
    #[error("That is not a valid zip code.")]
    InvalidZip,
    #[error("{0}")]
    Custom(String),
}

/// Kind-specific parse and validate step.
///
/// Implemented by every prompt kind in [`crate::kinds`]. `validate` receives
/// the working text that survived [`Sanitize::execute`] and returns the
/// kind's natural value or the reason it was refused.
pub trait Validate {
    type Output;

    fn validate(&self, input: &str) -> Result<Self::Output, Rejection>;

    /// Checks the kind's own parameters for consistency. Runs once, when a
    /// prompting call is set up.
    fn check_config(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Prompt text used when the caller did not provide one.
    fn default_prompt(&self) -> Option<String> {
        None
    }

    /// Stripping used when the prompt does not set one.
    fn default_strip(&self) -> Strip {
        Strip::Whitespace
    }

    /// How the answer is shown while it is typed.
    fn echo(&self) -> Echo {
        Echo::Visible
    }
}

impl<K: Validate + ?Sized> Validate for &K {
    type Output = K::Output;

    fn validate(&self, input: &str) -> Result<Self::Output, Rejection> {
        (**self).validate(input)
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        (**self).check_config()
    }

    fn default_prompt(&self) -> Option<String> {
        (**self).default_prompt()
    }

    fn default_strip(&self) -> Strip {
        (**self).default_strip()
    }

    fn echo(&self) -> Echo {
        (**self).echo()
    }
}

/// Parses `$input` into `$t`, mapping any parse failure to `Err($err)`.
///
/// # Example
/// ```rust,ignore
/// let n = check_type!("42", i64, Rejection::NotANumber("42".to_string()))?;
/// ```
macro_rules! check_type {
    ($input:expr, $t:ty, $err:expr) => {
        match $input.parse::<$t>() {
            Ok(value) => Ok(value),
            Err(_) => Err($err),
        }
    };
}
pub(crate) use check_type;

/// Result of the shared prevalidation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screened<'a> {
    /// Accepted without kind parsing: allowlisted, or blank when blanks are allowed.
    Allowed(&'a str),
    /// Passed the shared rules; the kind still has to validate it.
    Checked(&'a str),
}

/// Compiled shared rules of one prompt.
#[derive(Debug, Clone)]
pub struct Sanitize {
    blank: bool,
    strip: Strip,
    allowlist: Vec<Regex>,
    blocklist: Vec<(Regex, Option<String>)>,
}

impl Sanitize {
    /// Compiles the allow and block lists.
    ///
    /// # Errors
    /// [`ConfigError::InvalidRegex`] for the first pattern that does not compile.
    pub fn compile(
        blank: bool,
        strip: Strip,
        allowlist: &[String],
        blocklist: &[(String, Option<String>)],
    ) -> Result<Sanitize, ConfigError> {
        let allowlist = allowlist
            .iter()
            .map(|pattern| full_match(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        let blocklist = blocklist
            .iter()
            .map(|(pattern, message)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| (regex, message.clone()))
                    .map_err(|e| ConfigError::invalid_regex(pattern, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Sanitize {
            blank,
            strip,
            allowlist,
            blocklist,
        })
    }

    pub(crate) fn working<'a>(&self, answer: &'a str) -> &'a str {
        self.strip.apply(answer)
    }

    /// Strips the answer, then applies the blank, allowlist and blocklist rules.
    pub fn execute<'a>(&self, answer: &'a str) -> Result<Screened<'a>, Rejection> {
        let clean_answer = self.strip.apply(answer);

        if clean_answer.is_empty() {
            return if self.blank {
                Ok(Screened::Allowed(clean_answer))
            } else {
                Err(Rejection::Blank)
            };
        }

        if self.allowlist.iter().any(|r| r.is_match(clean_answer)) {
            return Ok(Screened::Allowed(clean_answer));
        }

        for (regex, message) in &self.blocklist {
            if regex.is_match(clean_answer) {
                return Err(Rejection::Blocked(
                    message
                        .clone()
                        .unwrap_or_else(|| DEFAULT_BLOCKLIST_RESPONSE.to_string()),
                ));
            }
        }

        Ok(Screened::Checked(clean_answer))
    }
}

fn full_match(pattern: &str) -> Result<Regex, ConfigError> {
    // Validate the user's pattern on its own first so the reported error
    // points at their text, not at the anchored wrapper.
    RegexBuilder::new(pattern)
        .build()
        .map_err(|e| ConfigError::invalid_regex(pattern, e))?;

    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::invalid_regex(pattern, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(allow: &[&str], block: &[(&str, Option<&str>)]) -> Sanitize {
        Sanitize::compile(
            false,
            Strip::Whitespace,
            &allow.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            &block
                .iter()
                .map(|(p, m)| (p.to_string(), m.map(str::to_string)))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn test_sanitize_strips_whitespace_by_default() {
        let filter = rules(&[], &[]);
        assert_eq!(filter.execute("  hello\n"), Ok(Screened::Checked("hello")));
    }

    #[test]
    fn test_sanitize_strip_chars_and_off() {
        assert_eq!(Strip::Chars("x".to_string()).apply("xxhixx"), "hi");
        assert_eq!(Strip::Off.apply("  hi "), "  hi ");
    }

    #[test]
    fn test_sanitize_blank_rejected() {
        let filter = rules(&[], &[]);
        let res = filter.execute("   ");
        assert_eq!(res, Err(Rejection::Blank));
        if let Err(e) = res {
            assert_eq!(format!("{}", e), "Blank values are not allowed.");
        }
    }

    #[test]
    fn test_sanitize_blank_allowed() {
        let filter = Sanitize::compile(true, Strip::Whitespace, &[], &[]).unwrap();
        assert_eq!(filter.execute("  "), Ok(Screened::Allowed("")));
    }

    #[test]
    fn test_sanitize_allowlist_requires_full_match() {
        let filter = rules(&["xyzzy"], &[]);
        assert_eq!(filter.execute("XYZZY"), Ok(Screened::Allowed("XYZZY")));
        assert_eq!(filter.execute("xyzzy2"), Ok(Screened::Checked("xyzzy2")));
    }

    #[test]
    fn test_sanitize_allowlist_beats_blocklist() {
        let filter = rules(&["moose"], &[("moose", None)]);
        assert_eq!(filter.execute("moose"), Ok(Screened::Allowed("moose")));
    }

    #[test]
    fn test_sanitize_blocklist_messages() {
        let filter = rules(&[], &[("moose", Some("Try again")), (r"[13579]$", None)]);

        let res = filter.execute("moose");
        assert_eq!(res, Err(Rejection::Blocked("Try again".to_string())));

        let res = filter.execute("43");
        assert!(res.is_err());
        if let Err(e) = res {
            assert_eq!(format!("{}", e), "This response is invalid.");
        }

        assert_eq!(filter.execute("cat"), Ok(Screened::Checked("cat")));
        assert_eq!(filter.execute("42"), Ok(Screened::Checked("42")));
    }

    #[test]
    fn test_sanitize_invalid_regex_is_config_error() {
        let res = Sanitize::compile(false, Strip::Whitespace, &["(".to_string()], &[]);
        assert!(matches!(res, Err(ConfigError::InvalidRegex { ref pattern, .. }) if pattern == "("));

        let res = Sanitize::compile(
            false,
            Strip::Whitespace,
            &[],
            &[("[a-".to_string(), None)],
        );
        assert!(matches!(res, Err(ConfigError::InvalidRegex { .. })));
    }

    #[test]
    fn test_check_type_macro() {
        let ok: Result<u8, Rejection> =
            check_type!("42", u8, Rejection::NotANumber("42".to_string()));
        assert_eq!(ok, Ok(42));

        let err: Result<u8, Rejection> =
            check_type!("256", u8, Rejection::NotANumber("256".to_string()));
        assert_eq!(err.unwrap_err().to_string(), "'256' is not a number.");
    }

    #[test]
    fn test_rejection_number_messages() {
        assert_eq!(
            Rejection::BelowMinimum(4.0).to_string(),
            "Number must be at minimum 4."
        );
        assert_eq!(
            Rejection::NotGreaterThan(4.0).to_string(),
            "Number must be greater than 4."
        );
        assert_eq!(
            Rejection::NotLessThan(6.5).to_string(),
            "Number must be less than 6.5."
        );
    }
}
