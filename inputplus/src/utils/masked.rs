//! # Masked console input
//!
//! Password answers are read from the terminal in raw mode so the typed
//! characters are never shown. Each keystroke is echoed as the mask
//! character, or not at all for [`Echo::Hidden`].
//!
//! Keys understood while typing:
//! - `Enter` ends the line
//! - `Backspace` removes the last character, `Ctrl-U` the whole line
//! - `Ctrl-D` on an empty line ends input
//! - `Ctrl-C` interrupts the read
use std::{
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use log::error;

use crate::utils::{Echo, ReadError};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a keystroke did to a [`MaskedLine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    /// Keep reading once this is written to the console.
    Echo(String),
    Done,
    EndOfInput,
    Interrupted,
}

/// A secret line being typed.
#[derive(Debug, Clone)]
pub struct MaskedLine {
    echo: Echo,
    text: String,
}

impl MaskedLine {
    pub fn new(echo: Echo) -> Self {
        MaskedLine {
            echo,
            text: String::new(),
        }
    }

    pub fn key(&mut self, key: KeyEvent) -> Keystroke {
        if key.kind == KeyEventKind::Release {
            return Keystroke::Echo(String::new());
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => Keystroke::Done,
            KeyCode::Char('c') if ctrl => Keystroke::Interrupted,
            KeyCode::Char('d') if ctrl && self.text.is_empty() => Keystroke::EndOfInput,
            KeyCode::Char('u') if ctrl => {
                let erased = self.text.chars().count();
                self.text.clear();
                Keystroke::Echo(self.erase(erased))
            }
            KeyCode::Backspace => {
                let erased = usize::from(self.text.pop().is_some());
                Keystroke::Echo(self.erase(erased))
            }
            KeyCode::Char(c) if !ctrl => {
                self.text.push(c);
                Keystroke::Echo(self.echo.display(c.encode_utf8(&mut [0; 4])))
            }
            _ => Keystroke::Echo(String::new()),
        }
    }

    fn erase(&self, count: usize) -> String {
        match self.echo {
            Echo::Mask(_) => "\u{8} \u{8}".repeat(count),
            _ => String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Leaves raw mode when dropped.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            error!("could not leave raw mode: {}", e);
        }
    }
}

/// Reads one secret line from the console.
///
/// Stops with [`ReadError::TimedOut`] once `timeout` passes or `cancel` is
/// set, whichever comes first.
pub fn read_masked(
    echo: Echo,
    timeout: Option<Duration>,
    cancel: &AtomicBool,
) -> Result<String, ReadError> {
    let deadline = timeout.map(|timeout| Instant::now() + timeout);
    let mut stdout = io::stdout();
    let mut line = MaskedLine::new(echo);
    let _raw = RawMode::enable()?;

    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(ReadError::TimedOut);
        }
        let wait = match deadline {
            Some(deadline) => {
                let left = deadline.saturating_duration_since(Instant::now());
                if left.is_zero() {
                    stdout.write_all(b"\r\n")?;
                    stdout.flush()?;
                    return Err(ReadError::TimedOut);
                }
                left.min(POLL_INTERVAL)
            }
            None => POLL_INTERVAL,
        };

        if !event::poll(wait)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match line.key(key) {
            Keystroke::Echo(shown) => {
                if !shown.is_empty() {
                    stdout.write_all(shown.as_bytes())?;
                    stdout.flush()?;
                }
            }
            Keystroke::Done => {
                stdout.write_all(b"\r\n")?;
                stdout.flush()?;
                return Ok(line.into_text());
            }
            Keystroke::EndOfInput => return Err(ReadError::Closed),
            Keystroke::Interrupted => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted").into());
            }
        }
    }
}
