//! # Retry loop
//!
//! The state machine behind every prompting call, kept free of I/O so the
//! blocking [`Terminal`](crate::utils::Terminal) and the async driver share
//! it. A driver repeats:
//!
//! 1. [`RetryLoop::expired`] before each read,
//! 2. write [`RetryLoop::prompt_text`] and read a line, handing the source
//!    [`RetryLoop::remaining`] as its deadline,
//! 3. [`RetryLoop::feed`] the line and act on the returned [`Step`], or
//!    [`RetryLoop::read_failed`] when no line came back.
//!
//! ```text
//! AwaitingInput -> Validating -> Accepted
//!                             -> Rejected -> AwaitingInput
//!                             -> TimedOut | LimitExceeded -> default or error
//! ```
//!
//! Timeouts are cooperative: they are checked before a read and after it
//! returns. An answer that validates but arrives after the deadline still
//! counts as a timeout.
use std::time::Duration;

use log::{debug, info, warn};

use crate::{
    error::{ConfigError, PromptError},
    prompt::{Attempt, Limits, Outcome, Prompt, Response},
    utils::{Echo, ReadError, Validate, ValidationOutcome, Validator},
};

/// Which limit ended a prompting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhausted {
    TimedOut,
    LimitReached,
}

/// What the driver does after feeding a line.
#[derive(Debug, PartialEq)]
pub enum Step<T> {
    /// Return this answer.
    Accept(Response<T>),
    /// Show `message`; then either read again or, if `exhausted`, call
    /// [`RetryLoop::finish`].
    Reject {
        message: String,
        exhausted: Option<Exhausted>,
    },
    /// The answer was valid but arrived after the deadline.
    Late,
}

pub struct RetryLoop<K: Validate> {
    validator: Validator<K>,
    text: String,
    default: Option<K::Output>,
    limits: Limits,
    start: Duration,
    tries: u32,
    attempts: Vec<Attempt>,
}

impl<K: Validate> RetryLoop<K> {
    /// Sets up a call starting at `now`.
    ///
    /// # Errors
    /// [`ConfigError`] when the kind or the prompt's patterns are invalid.
    /// Nothing has been written at that point.
    pub fn new(prompt: Prompt<K::Output>, kind: K, now: Duration) -> Result<Self, ConfigError> {
        let text = prompt
            .text
            .or_else(|| kind.default_prompt())
            .unwrap_or_default();
        let validator = Validator::new(prompt.rules, kind)?;

        Ok(RetryLoop {
            validator,
            text,
            default: prompt.default,
            limits: prompt.limits,
            start: now,
            tries: 0,
            attempts: Vec::new(),
        })
    }

    pub fn prompt_text(&self) -> &str {
        &self.text
    }

    /// How the driver must read answers.
    pub fn echo(&self) -> Echo {
        self.validator.kind().echo()
    }

    pub fn tries(&self) -> u32 {
        self.tries
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn into_attempts(self) -> Vec<Attempt> {
        self.attempts
    }

    fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start)
    }

    fn timed_out(&self, now: Duration) -> bool {
        self.limits
            .timeout
            .is_some_and(|timeout| self.elapsed(now) > timeout)
    }

    /// Time left before the timeout, if one is set.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.limits
            .timeout
            .map(|timeout| timeout.saturating_sub(self.elapsed(now)))
    }

    /// `Some` when the call must end before the next read.
    pub fn expired(&self, now: Duration) -> Option<Exhausted> {
        self.timed_out(now).then_some(Exhausted::TimedOut)
    }

    fn record(&mut self, raw: &str, text: String, now: Duration, outcome: Outcome) {
        // Secret answers are kept only as the mask the console showed.
        let (raw, text) = match self.echo() {
            Echo::Visible => (raw.to_string(), text),
            echo => (echo.display(raw), echo.display(&text)),
        };
        self.attempts.push(Attempt {
            number: self.tries,
            raw,
            text,
            elapsed: self.elapsed(now),
            outcome,
        });
    }

    /// Validates one line read at `now`.
    pub fn feed(&mut self, raw: &str, now: Duration) -> Step<K::Output> {
        self.tries += 1;
        let (text, outcome) = self.validator.run(raw);

        match outcome {
            ValidationOutcome::Accepted(response) => {
                if self.timed_out(now) {
                    debug!(
                        "attempt {} valid but late ({:?})",
                        self.tries,
                        self.elapsed(now)
                    );
                    self.record(raw, text, now, Outcome::TimedOut);
                    return Step::Late;
                }
                debug!("attempt {} accepted", self.tries);
                self.record(raw, text, now, Outcome::Accepted);
                Step::Accept(response)
            }
            ValidationOutcome::Rejected(rejection) => {
                let message = rejection.to_string();
                debug!("attempt {} rejected: {}", self.tries, message);
                self.record(raw, text, now, Outcome::Rejected(message.clone()));

                let exhausted = if self.timed_out(now) {
                    Some(Exhausted::TimedOut)
                } else if self.limits.attempts.is_some_and(|limit| self.tries >= limit) {
                    Some(Exhausted::LimitReached)
                } else {
                    None
                };
                Step::Reject { message, exhausted }
            }
        }
    }

    /// Ends the call when the source returned no line.
    pub fn read_failed(
        &mut self,
        err: ReadError,
        now: Duration,
    ) -> Result<Response<K::Output>, PromptError> {
        match err {
            ReadError::TimedOut => {
                self.tries += 1;
                self.record("", String::new(), now, Outcome::TimedOut);
                self.finish(Exhausted::TimedOut, now)
            }
            ReadError::Closed => {
                warn!("input closed after {} attempt(s)", self.tries);
                Err(PromptError::InputClosed)
            }
            ReadError::Io(e) => Err(PromptError::Io(e)),
        }
    }

    /// Falls back to the default value, or reports why the call failed.
    pub fn finish(
        &mut self,
        reason: Exhausted,
        now: Duration,
    ) -> Result<Response<K::Output>, PromptError> {
        if let Some(default) = self.default.take() {
            info!("{:?} after {} attempt(s), using default", reason, self.tries);
            return Ok(Response::Default(default));
        }

        warn!("{:?} after {} attempt(s)", reason, self.tries);
        Err(match reason {
            Exhausted::TimedOut => PromptError::TimedOut {
                after: self.limits.timeout.unwrap_or(self.elapsed(now)),
            },
            Exhausted::LimitReached => PromptError::RetryLimitExceeded {
                attempts: self.tries,
            },
        })
    }
}
