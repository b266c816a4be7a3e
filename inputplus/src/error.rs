//! # Errors
//!
//! Two families of errors escape a prompting call:
//!
//! - [`ConfigError`]: the parameters handed to a prompt contradict each other
//!   (`min > max`, duplicate choices, a malformed regex, ...). Raised when the
//!   call is set up, before the first prompt is written.
//! - [`PromptError`]: the call itself ended without an answer. Exhaustion
//!   (`RetryLimitExceeded`, `TimedOut`) is only reported when no default value
//!   was configured.
//!
//! Per-attempt failures never show up here. They are
//! [`Rejection`](crate::utils::Rejection)s, printed to the user and absorbed by
//! the retry loop.
use std::{io, time::Duration};

use thiserror::Error;

/// Contradictory or malformed prompt parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min ({min}) must not be greater than max ({max})")]
    MinAboveMax { min: f64, max: f64 },

    #[error("bounds leave no acceptable number: {0}")]
    EmptyRange(String),

    #[error("numeric bound {0} must be a finite number")]
    NotFinite(&'static str),

    #[error("choices must have at least two items, got {0}")]
    TooFewChoices(usize),

    #[error("duplicate entry {0:?} in choices")]
    DuplicateChoice(String),

    #[error("a lettered menu supports at most 26 choices, got {0}")]
    TooManyLettered(usize),

    #[error("at least one format string is required")]
    NoFormats,

    #[error("yes and no values {yes:?} and {no:?} cannot be told apart")]
    AmbiguousYesNo { yes: String, no: String },

    #[error("invalid regex {pattern:?}: {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("{0} is not a month number (1-12)")]
    InvalidMonth(u32),

    #[error("mask {0:?} must be a printable character")]
    InvalidMask(char),
}

impl ConfigError {
    pub(crate) fn invalid_regex(pattern: &str, err: regex::Error) -> Self {
        Self::InvalidRegex {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Terminal outcome of a prompting call that produced no answer.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Every allowed attempt was rejected and no default was configured.
    #[error("no valid input after {attempts} attempt(s)")]
    RetryLimitExceeded { attempts: u32 },

    /// The timeout elapsed and no default was configured.
    #[error("no valid input within {after:?}")]
    TimedOut { after: Duration },

    /// The input stream reached end of file.
    #[error("input stream closed before a valid answer was read")]
    InputClosed,

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}
