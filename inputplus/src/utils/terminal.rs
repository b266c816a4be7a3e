//! # Terminal
//!
//! Blocking driver of the [`RetryLoop`]: prompts on a [`LineSource`] until an
//! answer passes validation, a limit runs out or input ends.
//!
//! ## Features
//! - Re-prompts after every rejection, printing the reason first.
//! - Honors attempt limits and timeouts, falling back to a default value.
//! - Works on the real console ([`StdinSource`]) or on a script with
//!   simulated time ([`ScriptedSource`](crate::utils::ScriptedSource)).
//!
//! ### Example: bounded integer
//! ```rust,no_run
//! use inputplus::{Prompt, kinds::{Bounds, Int}, utils::Terminal};
//!
//! let threads = Terminal::stdin()
//!     .ask(Prompt::new("Scan threads (1-16): ").limit(3), Int::new(Bounds::new().min(1).max(16)))
//!     .unwrap();
//!
//! println!("Threads: {}", threads);
//! ```
//!
//! ### Example: scripted answers
//! ```rust
//! use inputplus::{Prompt, Response, kinds::Choice};
//! use inputplus::utils::{ManualClock, ScriptedSource, Terminal};
//!
//! let clock = ManualClock::new();
//! let source = ScriptedSource::new(clock.clone()).line("mouse").line("DoG");
//! let mut terminal = Terminal::new(source, clock);
//!
//! let pet = terminal.ask(Prompt::default(), Choice::new(["dog", "cat"])).unwrap();
//! assert_eq!(pet, Response::Value("dog".to_string()));
//! assert_eq!(terminal.source().messages(), vec!["'mouse' is not a valid choice."]);
//! ```
use std::{
    io::{self, BufRead, IsTerminal, Write},
    sync::{
        OnceLock,
        atomic::AtomicBool,
        mpsc::{self, Receiver, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use log::{error, warn};
use parking_lot::Mutex;

use crate::{
    error::PromptError,
    prompt::{Attempt, Prompt, Response},
    utils::{
        Clock, Echo, Exhausted, LineSource, ReadError, RetryLoop, Step, SystemClock, Validate,
        masked::read_masked,
    },
};

type StdinLines = Mutex<Receiver<io::Result<String>>>;

static STDIN_LINES: OnceLock<StdinLines> = OnceLock::new();

/// Lines of stdin read by a background thread, shared by every
/// interruptible [`StdinSource`] of the process.
fn stdin_lines() -> &'static StdinLines {
    STDIN_LINES.get_or_init(|| {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("inputplus-stdin".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                for line in stdin.lock().lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
            });
        if let Err(e) = spawned {
            error!("could not start the stdin reader thread: {}", e);
        }
        Mutex::new(rx)
    })
}

fn chomp(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// The process console: prompts on stdout, answers from stdin.
///
/// [`StdinSource::new`] blocks on stdin, so a timeout is only noticed once
/// the pending line arrives. [`StdinSource::interruptible`] stops waiting at
/// the deadline; a line typed after it is handed to the next prompt.
///
/// Secret answers are read in raw mode and always stop at the deadline.
/// When stdin is not a terminal they are read as plain lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource {
    interruptible: bool,
}

impl StdinSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interruptible() -> Self {
        StdinSource {
            interruptible: true,
        }
    }
}

impl LineSource for StdinSource {
    fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn write_message(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn read_line(&mut self, timeout: Option<Duration>) -> Result<String, ReadError> {
        if !self.interruptible {
            let mut line = String::new();
            return match io::stdin().read_line(&mut line)? {
                0 => Err(ReadError::Closed),
                _ => Ok(chomp(line)),
            };
        }

        let lines = stdin_lines().lock();
        let received = match timeout {
            Some(timeout) => lines.recv_timeout(timeout),
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => Ok(line?),
            Err(RecvTimeoutError::Timeout) => Err(ReadError::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Err(ReadError::Closed),
        }
    }

    fn read_secret(&mut self, timeout: Option<Duration>, echo: Echo) -> Result<String, ReadError> {
        if !io::stdin().is_terminal() {
            return self.read_line(timeout);
        }
        if STDIN_LINES.get().is_some() {
            warn!("stdin belongs to the reader thread, the answer will be visible");
            return self.read_line(timeout);
        }
        read_masked(echo, timeout, &AtomicBool::new(false))
    }
}

/// Asks questions on a [`LineSource`], timing them with a [`Clock`].
pub struct Terminal<S = StdinSource, C = SystemClock> {
    source: S,
    clock: C,
}

impl Terminal {
    /// Blocking console terminal.
    pub fn stdin() -> Self {
        Terminal::new(StdinSource::new(), SystemClock::default())
    }

    /// Console terminal whose reads stop at the prompt's timeout.
    pub fn stdin_interruptible() -> Self {
        Terminal::new(StdinSource::interruptible(), SystemClock::default())
    }
}

impl<S: LineSource, C: Clock> Terminal<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Terminal { source, clock }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Prompts until `kind` accepts an answer or `prompt`'s limits run out.
    ///
    /// # Errors
    /// - [`PromptError::Config`] before anything is written, for invalid
    ///   parameters.
    /// - [`PromptError::TimedOut`] / [`PromptError::RetryLimitExceeded`] when
    ///   the limits run out and no default was set.
    /// - [`PromptError::InputClosed`] / [`PromptError::Io`] from the source.
    pub fn ask<K: Validate>(
        &mut self,
        prompt: Prompt<K::Output>,
        kind: K,
    ) -> Result<Response<K::Output>, PromptError> {
        self.ask_with_attempts(prompt, kind).0
    }

    /// Like [`ask`](Terminal::ask), also returning every read cycle.
    pub fn ask_with_attempts<K: Validate>(
        &mut self,
        prompt: Prompt<K::Output>,
        kind: K,
    ) -> (Result<Response<K::Output>, PromptError>, Vec<Attempt>) {
        let mut run = match RetryLoop::new(prompt, kind, self.clock.now()) {
            Ok(run) => run,
            Err(e) => return (Err(e.into()), Vec::new()),
        };
        let result = self.drive(&mut run);
        (result, run.into_attempts())
    }

    fn drive<K: Validate>(
        &mut self,
        run: &mut RetryLoop<K>,
    ) -> Result<Response<K::Output>, PromptError> {
        loop {
            if let Some(reason) = run.expired(self.clock.now()) {
                return run.finish(reason, self.clock.now());
            }

            self.source.write_prompt(run.prompt_text())?;
            let left = run.remaining(self.clock.now());
            let line = match run.echo() {
                Echo::Visible => self.source.read_line(left),
                echo => self.source.read_secret(left, echo),
            };
            let now = self.clock.now();

            let line = match line {
                Ok(line) => line,
                Err(e) => return run.read_failed(e, now),
            };

            match run.feed(&line, now) {
                Step::Accept(response) => return Ok(response),
                Step::Reject { message, exhausted } => {
                    self.source.write_message(&message)?;
                    if let Some(reason) = exhausted {
                        return run.finish(reason, now);
                    }
                }
                Step::Late => return run.finish(Exhausted::TimedOut, now),
            }
        }
    }
}
