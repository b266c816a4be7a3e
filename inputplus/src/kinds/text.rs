//! Kinds that check the shape of a piece of text: addresses, paths,
//! patterns and codes.
use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use regex::Regex;

use crate::{
    error::ConfigError,
    utils::{ParsedUrl, Rejection, Validate, check_type, url::is_email},
};

/// An email address such as `al@inventwithpython.com`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Email;

impl Validate for Email {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        if is_email(input) {
            Ok(input.to_string())
        } else {
            Err(Rejection::InvalidEmail(input.to_string()))
        }
    }
}

/// A URL, returned parsed. See [`ParsedUrl`] for what is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Url;

impl Validate for Url {
    type Output = ParsedUrl;

    fn validate(&self, input: &str) -> Result<ParsedUrl, Rejection> {
        ParsedUrl::new(input).map_err(|_| Rejection::InvalidUrl(input.to_string()))
    }
}

/// An IPv4 or IPv6 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ip;

impl Validate for Ip {
    type Output = IpAddr;

    fn validate(&self, input: &str) -> Result<IpAddr, Rejection> {
        check_type!(input, IpAddr, Rejection::InvalidIp(input.to_string()))
    }
}

const FORBIDDEN_PATH_CHARS: &[char] = &['*', '?', '"', '<', '>', '|', '\0'];

fn valid_path_text(input: &str) -> bool {
    if input.contains(FORBIDDEN_PATH_CHARS) {
        return false;
    }

    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            // A colon may only follow the drive letter.
            input
                .char_indices()
                .filter(|(_, c)| *c == ':')
                .all(|(i, _)| i == 1 && input.as_bytes()[0].is_ascii_alphabetic())
        } else {
            true
        }
    }
}

/// A file system path. With `must_exist` the path has to name something
/// that exists when the answer is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filepath {
    pub must_exist: bool,
}

impl Filepath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }
}

impl Validate for Filepath {
    type Output = PathBuf;

    fn validate(&self, input: &str) -> Result<PathBuf, Rejection> {
        if !valid_path_text(input) {
            return Err(Rejection::InvalidFilepath(input.to_string()));
        }

        let path = Path::new(input);
        if self.must_exist && !path.exists() {
            return Err(Rejection::FileNotFound(input.to_string()));
        }
        Ok(path.to_path_buf())
    }
}

/// A single file name: no separators, and no trailing space or period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filename;

impl Validate for Filename {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let valid = !input.contains(FORBIDDEN_PATH_CHARS)
            && !input.contains(['/', '\\', ':'])
            && !input.ends_with([' ', '.']);

        if valid {
            Ok(input.to_string())
        } else {
            Err(Rejection::InvalidFilename(input.to_string()))
        }
    }
}

/// Text containing a match of a regular expression. The matched part is
/// returned.
#[derive(Debug, Clone)]
pub struct Matches {
    pattern: String,
    compiled: Result<Regex, String>,
    message: Option<String>,
}

impl Matches {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let compiled = Regex::new(&pattern).map_err(|e| e.to_string());
        Matches {
            pattern,
            compiled,
            message: None,
        }
    }

    /// Replaces the default rejection message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Validate for Matches {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let found = self
            .compiled
            .as_ref()
            .ok()
            .and_then(|regex| regex.find(input));

        match (found, &self.message) {
            (Some(m), _) => Ok(m.as_str().to_string()),
            (None, Some(message)) => Err(Rejection::Custom(message.clone())),
            (None, None) => Err(Rejection::NoPatternMatch(input.to_string())),
        }
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        match &self.compiled {
            Ok(_) => Ok(()),
            Err(reason) => Err(ConfigError::InvalidRegex {
                pattern: self.pattern.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// A regular expression typed by the user, returned compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegexStr;

impl Validate for RegexStr {
    type Output = Regex;

    fn validate(&self, input: &str) -> Result<Regex, Rejection> {
        Regex::new(input).map_err(|_| Rejection::InvalidRegex(input.to_string()))
    }
}

/// A US zip code: 3 to 5 digits, optionally followed by `-` and 4 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Zip;

impl Validate for Zip {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        let (base, plus_four) = match input.split_once('-') {
            Some((base, rest)) => (base, Some(rest)),
            None => (input, None),
        };

        let valid = (3..=5).contains(&base.len())
            && digits(base)
            && plus_four.is_none_or(|p| p.len() == 4 && digits(p));

        if valid {
            Ok(input.to_string())
        } else {
            Err(Rejection::InvalidZip)
        }
    }
}
