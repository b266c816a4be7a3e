//! # Validator
//!
//! Pure `(raw line, rules) -> outcome` step of a prompting call. A
//! [`Validator`] owns the compiled shared rules ([`Sanitize`]), the prompt
//! kind and the two transformation hooks. It keeps no state between calls:
//! validating the same line twice gives the same outcome.
//!
//! Pipeline: `apply` hook, then [`Sanitize::execute`] (strip, blank,
//! allowlist, blocklist), then the kind's [`Validate::validate`], then the
//! `post` hook on the parsed value.
use crate::{
    error::ConfigError,
    prompt::{ApplyFn, PostFn, Prompt, Response, Rules},
    utils::sanitize::{Rejection, Sanitize, Screened, Validate},
};

/// Tagged result of validating one answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome<T> {
    Accepted(Response<T>),
    Rejected(Rejection),
}

impl<T> ValidationOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    /// The message shown to the user, for a rejected answer.
    pub fn message(&self) -> Option<String> {
        match self {
            ValidationOutcome::Accepted(_) => None,
            ValidationOutcome::Rejected(r) => Some(r.to_string()),
        }
    }
}

pub struct Validator<K: Validate> {
    sanitize: Sanitize,
    kind: K,
    apply: Option<ApplyFn>,
    post: Option<PostFn<K::Output>>,
}

impl<K: Validate> Validator<K> {
    /// Builds a validator from a prompt's rules. Text, default and limits
    /// are dropped; only the retry loop uses them.
    ///
    /// # Errors
    /// [`ConfigError`] when the kind's parameters are inconsistent or a
    /// pattern does not compile.
    pub fn from_prompt(prompt: Prompt<K::Output>, kind: K) -> Result<Self, ConfigError> {
        Self::new(prompt.rules, kind)
    }

    pub(crate) fn new(rules: Rules<K::Output>, kind: K) -> Result<Self, ConfigError> {
        kind.check_config()?;
        let strip = rules.strip.unwrap_or_else(|| kind.default_strip());
        let sanitize = Sanitize::compile(
            rules.blank,
            strip,
            &rules.allowlist,
            &rules.blocklist,
        )?;

        Ok(Validator {
            sanitize,
            kind,
            apply: rules.apply,
            post: rules.post,
        })
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn validate(&self, raw: &str) -> ValidationOutcome<K::Output> {
        self.run(raw).1
    }

    /// Validates `raw` and also returns the working text the kind saw.
    pub(crate) fn run(&self, raw: &str) -> (String, ValidationOutcome<K::Output>) {
        let transformed = match &self.apply {
            Some(apply) => apply(raw.to_string()),
            None => raw.to_string(),
        };

        let screened = match self.sanitize.execute(&transformed) {
            Ok(screened) => screened,
            Err(rejection) => {
                let working = self.sanitize.working(&transformed).to_string();
                return (working, ValidationOutcome::Rejected(rejection));
            }
        };

        match screened {
            Screened::Allowed(text) => (
                text.to_string(),
                ValidationOutcome::Accepted(Response::Text(text.to_string())),
            ),
            Screened::Checked(text) => {
                let outcome = match self.kind.validate(text) {
                    Ok(value) => {
                        let value = match &self.post {
                            Some(post) => post(value),
                            None => value,
                        };
                        ValidationOutcome::Accepted(Response::Value(value))
                    }
                    Err(rejection) => ValidationOutcome::Rejected(rejection),
                };
                (text.to_string(), outcome)
            }
        }
    }
}
