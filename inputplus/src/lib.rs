//! # InputPlus
//!
//! Validating console prompts for Rust CLI applications. Ask a question, get
//! back a typed answer, and let the library handle the re-prompting, attempt
//! limits, timeouts and default values.
//!
//! ## Features
//!
//! ### Currently Available
//!
//! (All feature versions)
//! - **Validation pipeline** - strip, blank check, regex allowlist and blocklist, kind parsing
//! - **Prompt kinds** - numbers with bounds, choices and menus, yes/no, dates and times,
//!   email, URL, IP, file paths, patterns, months and days, zip codes, US states,
//!   passwords, custom closures
//! - **Retry loop** - attempt limits, timeouts and defaults as an I/O free state machine
//! - **Scripted console** - replay answers against a manual clock in tests
//!
//! ("std" feature)
//! - **Terminal** - blocking prompts on stdin/stdout, optionally interruptible at the timeout
//! - **Masked input** - password answers read in raw mode with crossterm
//! - **`input_*` functions** - one call per prompt kind
//!
//! ("tokio-dep" feature)
//! - **AsyncTerminal** - async prompts where the timeout cancels the pending read
//!
//! ("serde" feature)
//! - Serialize/Deserialize for attempt records, numbers, menu styles and strip modes
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! inputplus = { version = "0.1.0", features = ["std"]}
//! inputplus = { version = "0.1.0", features = ["tokio-dep"]}
//! ```
//!
//! ## Usage Examples
//!
//! ### Basic Input & Range Validation
//!
//! ```rust,no_run
//! use inputplus::{Prompt, input_int, kinds::Bounds};
//!
//! let threads = input_int(
//!     Prompt::new("Enter scan threads (1-16): "),
//!     Bounds::new().min(1).max(16),
//! )
//! .unwrap();
//! println!("Threads: {}", threads);
//! ```
//!
//! ### Limits and Defaults
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use inputplus::{Prompt, Response, input_yes_no};
//!
//! let answer = input_yes_no(
//!     Prompt::new("Overwrite? ")
//!         .limit(3)
//!         .timeout(Duration::from_secs(10))
//!         .default_value("no".to_string()),
//! )
//! .unwrap();
//!
//! if let Response::Default(_) = answer {
//!     println!("No answer, keeping the file.");
//! }
//! ```
//!
//! ### Allow and Block Lists
//!
//! ```rust,no_run
//! use inputplus::{Prompt, Response, input_num, kinds::Bounds};
//!
//! let answer = input_num(
//!     Prompt::new("Amount (or 'all'): ")
//!         .allow("all")
//!         .block_with(r"^-", "Amounts cannot be negative."),
//!     Bounds::new(),
//! )
//! .unwrap();
//!
//! match answer {
//!     Response::Text(all) => println!("{}", all),
//!     other => println!("{}", other),
//! }
//! ```
//!
//! ### Testing Prompts
//!
//! ```rust
//! use std::time::Duration;
//! use inputplus::{Prompt, PromptError, kinds::Int};
//! use inputplus::utils::{ManualClock, ScriptedSource, Terminal};
//!
//! let clock = ManualClock::new();
//! let source = ScriptedSource::new(clock.clone()).line_after(Duration::from_secs(6), "42");
//! let mut terminal = Terminal::new(source, clock);
//!
//! let res = terminal.ask(Prompt::new("> ").timeout(Duration::from_secs(5)), Int::default());
//! assert!(matches!(res, Err(PromptError::TimedOut { .. })));
//! ```
//!
//! ## Architecture
//!
//! - **`kinds`** - one [`Validate`](utils::Validate) implementation per kind of answer
//! - **`utils`** - sanitization, validator, URL parsing, line sources, retry loop, masked input, terminal
//! - **`functions`** - `input_*` helpers, re-exported at the crate root
//! - **`asynchronous`** - tokio driver
//!
//! ## Error Handling
//!
//! Per-answer problems are [`Rejection`](utils::Rejection)s: shown to the user,
//! then the question is asked again. Only the end of a call surfaces as a
//! [`PromptError`]:
//!
//! ```rust,no_run
//! use inputplus::{ConfigError, Prompt, PromptError, input_int, kinds::Bounds};
//!
//! match input_int(Prompt::new("> ").limit(3), Bounds::new().min(1)) {
//!     Ok(n) => println!("{}", n),
//!     Err(PromptError::RetryLimitExceeded { attempts }) => eprintln!("gave up after {attempts}"),
//!     Err(PromptError::Config(ConfigError::InvalidRegex { pattern, .. })) => eprintln!("bad pattern {pattern}"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```
//!
//! ## License
//!
//! This project is licensed under the MIT License.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub use error::{ConfigError, PromptError};

pub mod prompt;
pub use prompt::{Attempt, Limits, Outcome, Prompt, Response};

pub mod kinds;

pub mod utils;

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        pub mod functions;
        pub use functions::*;
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub mod asynchronous;
    }
}
