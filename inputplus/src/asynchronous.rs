//! # Async prompting (`tokio-dep`)
//!
//! [`AsyncTerminal`] drives the same [`RetryLoop`] as the blocking
//! [`Terminal`](crate::utils::Terminal), over an [`AsyncLineSource`]. The
//! read is wrapped in [`tokio::time::timeout`], so a prompt with a timeout
//! stops waiting at the deadline instead of at the next line.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use inputplus::{Prompt, asynchronous::AsyncTerminal, kinds::YesNo};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut terminal = AsyncTerminal::stdin();
//!     let answer = terminal
//!         .ask(
//!             Prompt::new("Continue? ")
//!                 .timeout(Duration::from_secs(10))
//!                 .default_value("no".to_string()),
//!             YesNo::default(),
//!         )
//!         .await;
//!     println!("{:?}", answer);
//! }
//! ```
use std::{
    io::{self, IsTerminal},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt, Stdin, Stdout},
    time::{Instant, timeout},
};
use tokio_stream::StreamExt;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

use crate::{
    error::PromptError,
    prompt::{Attempt, Prompt, Response},
    utils::{Clock, Echo, Exhausted, ReadError, RetryLoop, Step, Validate, masked::read_masked},
};

/// Async counterpart of [`LineSource`](crate::utils::LineSource). Deadlines
/// are enforced by the driver, so `read_line` takes none; it must be
/// cancel safe.
#[async_trait]
pub trait AsyncLineSource: Send {
    async fn write_prompt(&mut self, text: &str) -> io::Result<()>;

    async fn write_message(&mut self, text: &str) -> io::Result<()>;

    async fn read_line(&mut self) -> Result<String, ReadError>;

    /// Reads a line that must not be shown as typed; `echo` is never
    /// [`Echo::Visible`]. Must be cancel safe like `read_line`.
    async fn read_secret(&mut self, echo: Echo) -> Result<String, ReadError> {
        let _ = echo;
        self.read_line().await
    }
}

async fn read_answer<S: AsyncLineSource>(source: &mut S, echo: Echo) -> Result<String, ReadError> {
    match echo {
        Echo::Visible => source.read_line().await,
        echo => source.read_secret(echo).await,
    }
}

/// Stops a blocking masked read once the read future is dropped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Longest line [`AsyncStdinSource`] buffers; a longer one is read as an
/// [`io::ErrorKind::InvalidData`] error.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// The process console over tokio's stdin and stdout, or any reader and
/// writer given to [`AsyncStdinSource::with_io`].
///
/// On the process console, secret answers are read in raw mode on a
/// blocking thread. Otherwise they are read as plain lines.
pub struct AsyncStdinSource<R = Stdin, W = Stdout> {
    lines: FramedRead<R, LinesCodec>,
    writer: W,
    console: bool,
}

impl AsyncStdinSource {
    pub fn new() -> Self {
        AsyncStdinSource {
            console: io::stdin().is_terminal(),
            ..AsyncStdinSource::with_io(tokio::io::stdin(), tokio::io::stdout())
        }
    }
}

impl Default for AsyncStdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncRead, W> AsyncStdinSource<R, W> {
    pub fn with_io(reader: R, writer: W) -> Self {
        AsyncStdinSource {
            lines: FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)),
            writer,
            console: false,
        }
    }
}

#[async_trait]
impl<R, W> AsyncLineSource for AsyncStdinSource<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn write_prompt(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    async fn write_message(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn read_line(&mut self) -> Result<String, ReadError> {
        match self.lines.next().await {
            Some(Ok(line)) => Ok(line),
            Some(Err(LinesCodecError::Io(e))) => Err(ReadError::Io(e)),
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => Err(ReadError::Io(
                io::Error::new(io::ErrorKind::InvalidData, "line too long"),
            )),
            None => Err(ReadError::Closed),
        }
    }

    async fn read_secret(&mut self, echo: Echo) -> Result<String, ReadError> {
        if !self.console {
            return self.read_line().await;
        }
        let cancel = Arc::new(AtomicBool::new(false));
        let _cancel_on_drop = CancelOnDrop(cancel.clone());
        tokio::task::spawn_blocking(move || read_masked(echo, None, &cancel))
            .await
            .map_err(|e| ReadError::Io(io::Error::other(e)))?
    }
}

/// Tokio's clock, which follows paused and advanced test time.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl Default for TokioClock {
    fn default() -> Self {
        TokioClock {
            origin: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

pub struct AsyncTerminal<S = AsyncStdinSource> {
    source: S,
    clock: TokioClock,
}

impl AsyncTerminal {
    pub fn stdin() -> Self {
        AsyncTerminal::new(AsyncStdinSource::new())
    }
}

impl<S: AsyncLineSource> AsyncTerminal<S> {
    pub fn new(source: S) -> Self {
        AsyncTerminal {
            source,
            clock: TokioClock::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// See [`Terminal::ask`](crate::utils::Terminal::ask).
    pub async fn ask<K: Validate>(
        &mut self,
        prompt: Prompt<K::Output>,
        kind: K,
    ) -> Result<Response<K::Output>, PromptError> {
        self.ask_with_attempts(prompt, kind).await.0
    }

    pub async fn ask_with_attempts<K: Validate>(
        &mut self,
        prompt: Prompt<K::Output>,
        kind: K,
    ) -> (Result<Response<K::Output>, PromptError>, Vec<Attempt>) {
        let mut run = match RetryLoop::new(prompt, kind, self.clock.now()) {
            Ok(run) => run,
            Err(e) => return (Err(e.into()), Vec::new()),
        };
        let result = self.drive(&mut run).await;
        (result, run.into_attempts())
    }

    async fn drive<K: Validate>(
        &mut self,
        run: &mut RetryLoop<K>,
    ) -> Result<Response<K::Output>, PromptError> {
        loop {
            if let Some(reason) = run.expired(self.clock.now()) {
                return run.finish(reason, self.clock.now());
            }

            self.source.write_prompt(run.prompt_text()).await?;
            let echo = run.echo();
            let line = match run.remaining(self.clock.now()) {
                Some(left) => match timeout(left, read_answer(&mut self.source, echo)).await {
                    Ok(read) => read,
                    Err(_) => Err(ReadError::TimedOut),
                },
                None => read_answer(&mut self.source, echo).await,
            };
            let now = self.clock.now();

            let line = match line {
                Ok(line) => line,
                Err(e) => return run.read_failed(e, now),
            };

            match run.feed(&line, now) {
                Step::Accept(response) => return Ok(response),
                Step::Reject { message, exhausted } => {
                    self.source.write_message(&message).await?;
                    if let Some(reason) = exhausted {
                        return run.finish(reason, now);
                    }
                }
                Step::Late => return run.finish(Exhausted::TimedOut, now),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{
        kinds::{Bounds, Int, Password, Text},
        prompt::Outcome,
    };

    /// Answers typed after a delay, in tokio time.
    #[derive(Default)]
    struct Typist {
        lines: VecDeque<(Duration, String)>,
        prompts: Vec<String>,
        messages: Vec<String>,
    }

    impl Typist {
        fn after(mut self, secs: u64, line: &str) -> Self {
            self.lines
                .push_back((Duration::from_secs(secs), line.to_string()));
            self
        }
    }

    #[async_trait]
    impl AsyncLineSource for Typist {
        async fn write_prompt(&mut self, text: &str) -> io::Result<()> {
            self.prompts.push(text.to_string());
            Ok(())
        }

        async fn write_message(&mut self, text: &str) -> io::Result<()> {
            self.messages.push(text.to_string());
            Ok(())
        }

        async fn read_line(&mut self) -> Result<String, ReadError> {
            let delay = match self.lines.front() {
                Some((delay, _)) => *delay,
                None => return Err(ReadError::Closed),
            };
            tokio::time::sleep(delay).await;
            self.lines
                .pop_front()
                .map(|(_, line)| line)
                .ok_or(ReadError::Closed)
        }
    }

    #[tokio::test]
    async fn test_async_source_rejects_overlong_line() {
        let mut input = "a".repeat(MAX_LINE_LENGTH + 1);
        input.push_str("\nok\r\n");
        let mut source = AsyncStdinSource::with_io(input.as_bytes(), Vec::new());

        match source.read_line().await {
            Err(ReadError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("expected an overlong line error, got {:?}", other),
        }

        source.write_prompt("> ").await.unwrap();
        source.write_message("bad").await.unwrap();
        assert_eq!(source.writer, b"> bad\n");
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_terminal_retries_then_accepts() {
        let mut term = AsyncTerminal::new(Typist::default().after(1, "dog").after(1, "5"));
        let res = term
            .ask(Prompt::new("> "), Int::new(Bounds::new().min(4).max(6)))
            .await
            .unwrap();

        assert_eq!(res, Response::Value(5));
        assert_eq!(term.source().prompts.len(), 2);
        assert_eq!(term.source().messages, vec!["'dog' is not a number."]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_terminal_timeout_cancels_read() {
        let mut term = AsyncTerminal::new(Typist::default().after(60, "42"));
        let start = Instant::now();
        let (res, attempts) = term
            .ask_with_attempts(Prompt::new("> ").timeout(Duration::from_secs(5)), Int::default())
            .await;

        assert!(matches!(res, Err(PromptError::TimedOut { .. })));
        assert_eq!(start.elapsed(), Duration::from_secs(5));
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].outcome, Outcome::TimedOut);
        // Cancelled before it finished typing.
        assert_eq!(term.source().lines.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_terminal_timeout_default() {
        let mut term = AsyncTerminal::new(Typist::default().after(10, "hello"));
        let res = term
            .ask(
                Prompt::new("> ")
                    .timeout(Duration::from_secs(5))
                    .default_value("fallback".to_string()),
                Text,
            )
            .await
            .unwrap();
        assert_eq!(res, Response::Default("fallback".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_terminal_password_times_out_like_any_read() {
        let mut term = AsyncTerminal::new(Typist::default().after(1, "pw ").after(30, "late"));
        let res = term.ask(Prompt::new("> "), Password::new(None)).await.unwrap();
        assert_eq!(res, Response::Value("pw ".to_string()));

        let (res, attempts) = term
            .ask_with_attempts(
                Prompt::new("> ").timeout(Duration::from_secs(5)),
                Password::default(),
            )
            .await;
        assert!(matches!(res, Err(PromptError::TimedOut { .. })));
        assert_eq!(attempts[0].raw, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_async_terminal_limit_and_closed() {
        let mut term = AsyncTerminal::new(Typist::default().after(0, "x"));
        let res = term.ask(Prompt::new("> ").limit(1), Int::default()).await;
        assert!(matches!(res, Err(PromptError::RetryLimitExceeded { attempts: 1 })));

        let res = term.ask(Prompt::new("> "), Int::default()).await;
        assert!(matches!(res, Err(PromptError::InputClosed)));
    }
}
