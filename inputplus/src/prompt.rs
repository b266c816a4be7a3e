//! # Prompt configuration and answers
//!
//! [`Prompt`] gathers the fields every prompt kind shares: the text shown to
//! the user, the default value, retry and timeout limits, stripping, the
//! allow/block lists and the two transformation hooks. It is built with
//! chained setters and consumed by exactly one prompting call.
//!
//! ```rust
//! use std::time::Duration;
//! use inputplus::Prompt;
//!
//! let prompt: Prompt<i64> = Prompt::new("How many threads? ")
//!     .limit(3)
//!     .timeout(Duration::from_secs(30))
//!     .default_value(4)
//!     .block_with(r"^0+$", "Zero threads would never finish.");
//! # let _ = prompt;
//! ```
use std::{fmt::Display, time::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::Strip;

pub(crate) type ApplyFn = Box<dyn Fn(String) -> String + Send + Sync>;
pub(crate) type PostFn<T> = Box<dyn Fn(T) -> T + Send + Sync>;

/// Bounds on how long a prompting call may keep asking.
///
/// Neither set means the loop only ends on a valid answer. When both are set,
/// whichever fires first ends the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    pub timeout: Option<Duration>,
    pub attempts: Option<u32>,
}

/// Rules that feed the [`Validator`](crate::utils::Validator).
pub(crate) struct Rules<T> {
    pub(crate) blank: bool,
    /// `None` leaves it to the kind.
    pub(crate) strip: Option<Strip>,
    pub(crate) allowlist: Vec<String>,
    pub(crate) blocklist: Vec<(String, Option<String>)>,
    pub(crate) apply: Option<ApplyFn>,
    pub(crate) post: Option<PostFn<T>>,
}

/// Configuration of a single prompting call.
pub struct Prompt<T> {
    pub(crate) text: Option<String>,
    pub(crate) default: Option<T>,
    pub(crate) limits: Limits,
    pub(crate) rules: Rules<T>,
}

impl<T> Default for Prompt<T> {
    fn default() -> Self {
        Prompt {
            text: None,
            default: None,
            limits: Limits::default(),
            rules: Rules {
                blank: false,
                strip: None,
                allowlist: Vec::new(),
                blocklist: Vec::new(),
                apply: None,
                post: None,
            },
        }
    }
}

impl<T> Prompt<T> {
    /// A prompt showing `text` before every read.
    pub fn new(text: impl Into<String>) -> Self {
        Prompt {
            text: Some(text.into()),
            ..Prompt::default()
        }
    }

    /// Value returned instead of an error once the limits are exhausted.
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Accept an empty answer (returned as [`Response::Text`]).
    pub fn blank(mut self, allow: bool) -> Self {
        self.rules.blank = allow;
        self
    }

    /// Stop asking once `timeout` has elapsed since the first prompt.
    /// A zero duration leaves the call unbounded.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.limits.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Stop asking after `attempts` rejected answers. Zero leaves the call unbounded.
    pub fn limit(mut self, attempts: u32) -> Self {
        self.limits.attempts = (attempts > 0).then_some(attempts);
        self
    }

    /// Overrides the kind's stripping, which is [`Strip::Whitespace`] for
    /// everything but passwords.
    pub fn strip(mut self, strip: Strip) -> Self {
        self.rules.strip = Some(strip);
        self
    }

    /// Answers fully matching `pattern` are accepted verbatim, skipping kind validation.
    pub fn allow(mut self, pattern: impl Into<String>) -> Self {
        self.rules.allowlist.push(pattern.into());
        self
    }

    /// Answers containing a match of `pattern` are rejected with the generic message.
    pub fn block(mut self, pattern: impl Into<String>) -> Self {
        self.rules.blocklist.push((pattern.into(), None));
        self
    }

    /// Answers containing a match of `pattern` are rejected with `message`.
    pub fn block_with(mut self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules
            .blocklist
            .push((pattern.into(), Some(message.into())));
        self
    }

    /// Transforms the raw line before any validation.
    pub fn apply<F>(mut self, f: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.rules.apply = Some(Box::new(f));
        self
    }

    /// Transforms the parsed value after it passed validation. Never applied
    /// to passthrough text or to the default value.
    pub fn post<F>(mut self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        self.rules.post = Some(Box::new(f));
        self
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }
}

/// What a prompting call hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    /// Parsed and validated by the prompt kind.
    Value(T),
    /// Accepted without kind parsing: an allowlisted answer, or a blank one
    /// when blanks are allowed.
    Text(String),
    /// The limits ran out and the configured default stood in.
    Default(T),
}

impl<T> Response<T> {
    /// The typed value, whether parsed or defaulted.
    pub fn value(&self) -> Option<&T> {
        match self {
            Response::Value(v) | Response::Default(v) => Some(v),
            Response::Text(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Response::Value(v) | Response::Default(v) => Some(v),
            Response::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Response::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Response::Default(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        match self {
            Response::Value(v) => Response::Value(f(v)),
            Response::Text(t) => Response::Text(t),
            Response::Default(v) => Response::Default(f(v)),
        }
    }
}

impl<T: Display> Display for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) | Self::Default(v) => write!(f, "{}", v),
            Self::Text(t) => write!(f, "{}", t),
        }
    }
}

/// How one read cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    Accepted,
    Rejected(String),
    TimedOut,
}

/// Record of one read cycle of a prompting call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attempt {
    /// 1-based position within the call.
    pub number: u32,
    /// The line as read, before any transformation. Masked for passwords.
    pub raw: String,
    /// The text the kind saw, after `apply` and stripping.
    pub text: String,
    /// Time since the call started, measured when the read returned.
    pub elapsed: Duration,
    pub outcome: Outcome,
}
