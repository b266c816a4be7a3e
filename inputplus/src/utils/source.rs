//! # Line sources and clocks
//!
//! The retry loop talks to the console through [`LineSource`] and measures
//! time through [`Clock`]. Both are traits so the loop can run against the
//! real terminal ([`StdinSource`](crate::utils::StdinSource) with
//! [`SystemClock`]) or against a script with simulated time
//! ([`ScriptedSource`] with [`ManualClock`]).
use std::{
    collections::VecDeque,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use thiserror::Error;

/// Why [`LineSource::read_line`] returned no line.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The source gave up waiting at the deadline it was handed.
    #[error("timed out waiting for a line")]
    TimedOut,
    /// End of input.
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How an answer is shown while it is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Echo {
    #[default]
    Visible,
    /// Nothing is shown.
    Hidden,
    /// Each character is shown as this one.
    Mask(char),
}

impl Echo {
    pub fn is_secret(&self) -> bool {
        !matches!(self, Echo::Visible)
    }

    /// What the console shows for `text`.
    pub fn display(&self, text: &str) -> String {
        match self {
            Echo::Visible => text.to_string(),
            Echo::Hidden => String::new(),
            Echo::Mask(mask) => text.chars().map(|_| *mask).collect(),
        }
    }
}

/// Where prompts are written and answers are read.
pub trait LineSource {
    /// Writes the prompt text, without adding a newline.
    fn write_prompt(&mut self, text: &str) -> io::Result<()>;

    /// Writes a rejection message on its own line.
    fn write_message(&mut self, text: &str) -> io::Result<()>;

    /// Reads one line without its line terminator.
    ///
    /// `timeout` is the time left before the prompting call expires. Sources
    /// that can stop waiting return [`ReadError::TimedOut`] once it passes;
    /// blocking sources may ignore it.
    fn read_line(&mut self, timeout: Option<Duration>) -> Result<String, ReadError>;

    /// Reads a line that must not be shown as typed; `echo` is never
    /// [`Echo::Visible`]. Sources with no way to hide input read normally.
    fn read_secret(&mut self, timeout: Option<Duration>, echo: Echo) -> Result<String, ReadError> {
        let _ = echo;
        self.read_line(timeout)
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        (**self).write_prompt(text)
    }

    fn write_message(&mut self, text: &str) -> io::Result<()> {
        (**self).write_message(text)
    }

    fn read_line(&mut self, timeout: Option<Duration>) -> Result<String, ReadError> {
        (**self).read_line(timeout)
    }

    fn read_secret(&mut self, timeout: Option<Duration>, echo: Echo) -> Result<String, ReadError> {
        (**self).read_secret(timeout, echo)
    }
}

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

/// Something written to a [`ScriptedSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    Prompt(String),
    Message(String),
    /// What the console showed while a secret answer was typed.
    Echoed(String),
}

/// Replays queued answers, each after a simulated typing delay, and records
/// everything written to it.
///
/// Reading an answer advances the shared [`ManualClock`] by its delay. With
/// [`honor_timeout`](ScriptedSource::honor_timeout) the source behaves like
/// an interruptible console: a delay longer than the time left advances the
/// clock only to the deadline and reports [`ReadError::TimedOut`]. An empty
/// script reads as [`ReadError::Closed`].
///
/// ```rust
/// use std::time::Duration;
/// use inputplus::utils::{Clock, LineSource, ManualClock, ScriptedSource};
///
/// let clock = ManualClock::new();
/// let mut source = ScriptedSource::new(clock.clone())
///     .line("cat")
///     .line_after(Duration::from_secs(3), "42");
///
/// assert_eq!(source.read_line(None).unwrap(), "cat");
/// assert_eq!(source.read_line(None).unwrap(), "42");
/// assert_eq!(clock.now(), Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<(Duration, String)>,
    clock: ManualClock,
    honor_timeout: bool,
    transcript: Vec<Written>,
}

impl ScriptedSource {
    pub fn new(clock: ManualClock) -> Self {
        ScriptedSource {
            script: VecDeque::new(),
            clock,
            honor_timeout: false,
            transcript: Vec::new(),
        }
    }

    /// Queues an answer typed instantly.
    pub fn line(self, text: impl Into<String>) -> Self {
        self.line_after(Duration::ZERO, text)
    }

    /// Queues an answer typed `delay` after the read starts.
    pub fn line_after(mut self, delay: Duration, text: impl Into<String>) -> Self {
        self.script.push_back((delay, text.into()));
        self
    }

    pub fn honor_timeout(mut self, honor: bool) -> Self {
        self.honor_timeout = honor;
        self
    }

    pub fn transcript(&self) -> &[Written] {
        &self.transcript
    }

    pub fn prompts(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|w| match w {
                Written::Prompt(p) => Some(p.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.transcript
            .iter()
            .filter_map(|w| match w {
                Written::Message(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Answers not read yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LineSource for ScriptedSource {
    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(Written::Prompt(text.to_string()));
        Ok(())
    }

    fn write_message(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push(Written::Message(text.to_string()));
        Ok(())
    }

    fn read_secret(&mut self, timeout: Option<Duration>, echo: Echo) -> Result<String, ReadError> {
        let line = self.read_line(timeout)?;
        self.transcript.push(Written::Echoed(echo.display(&line)));
        Ok(line)
    }

    fn read_line(&mut self, timeout: Option<Duration>) -> Result<String, ReadError> {
        let Some((delay, line)) = self.script.pop_front() else {
            return Err(ReadError::Closed);
        };

        match timeout {
            Some(left) if self.honor_timeout && delay > left => {
                self.clock.advance(left);
                // The answer is still being typed; the next read picks it up.
                self.script.push_front((delay - left, line));
                Err(ReadError::TimedOut)
            }
            _ => {
                self.clock.advance(delay);
                Ok(line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(Duration::from_secs(2));
        other.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_millis(2500));
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::default();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn test_scripted_source_records_and_replays() {
        let clock = ManualClock::new();
        let mut source = ScriptedSource::new(clock.clone())
            .line("dog")
            .line_after(Duration::from_secs(6), "cat");

        source.write_prompt("Pet? ").unwrap();
        assert_eq!(source.read_line(Some(Duration::from_secs(5))).unwrap(), "dog");
        source.write_message("'dog' is not a valid choice.").unwrap();
        assert_eq!(source.read_line(Some(Duration::from_secs(5))).unwrap(), "cat");

        assert_eq!(clock.now(), Duration::from_secs(6));
        assert_eq!(source.prompts(), vec!["Pet? "]);
        assert_eq!(source.messages(), vec!["'dog' is not a valid choice."]);
        assert!(matches!(source.read_line(None), Err(ReadError::Closed)));
    }

    #[test]
    fn test_scripted_source_records_secret_echo() {
        let clock = ManualClock::new();
        let mut source = ScriptedSource::new(clock).line("hunter2").line("pw");

        assert_eq!(source.read_secret(None, Echo::Mask('*')).unwrap(), "hunter2");
        assert_eq!(source.read_secret(None, Echo::Hidden).unwrap(), "pw");
        assert_eq!(
            source.transcript(),
            &[Written::Echoed("*******".to_string()), Written::Echoed(String::new())]
        );
        assert!(source.prompts().is_empty());
    }

    #[test]
    fn test_echo_display() {
        assert_eq!(Echo::Visible.display("abc"), "abc");
        assert_eq!(Echo::Hidden.display("abc"), "");
        assert_eq!(Echo::Mask('•').display("añb"), "•••");
        assert!(!Echo::default().is_secret());
        assert!(Echo::Hidden.is_secret());
    }

    #[test]
    fn test_scripted_source_honoring_timeout_stops_at_deadline() {
        let clock = ManualClock::new();
        let mut source = ScriptedSource::new(clock.clone())
            .line_after(Duration::from_secs(6), "42")
            .honor_timeout(true);

        assert!(matches!(
            source.read_line(Some(Duration::from_secs(5))),
            Err(ReadError::TimedOut)
        ));
        assert_eq!(clock.now(), Duration::from_secs(5));
        assert_eq!(source.remaining(), 1);

        assert_eq!(source.read_line(None).unwrap(), "42");
        assert_eq!(clock.now(), Duration::from_secs(6));
    }
}
