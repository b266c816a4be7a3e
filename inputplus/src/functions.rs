//! # Prompting functions
//!
//! One `input_*` function per prompt kind. The free functions ask on the
//! process console; the [`Terminal`] methods of the same name ask on any
//! [`LineSource`]. Kinds with more options than the arguments below are
//! used through [`Terminal::ask`] directly.
//!
//! ```rust,no_run
//! use inputplus::{Prompt, input_int, input_menu, kinds::{Bounds, MenuStyle}};
//!
//! let age = input_int(Prompt::new("Age: ").limit(3), Bounds::new().min(0)).unwrap();
//! let pet = input_menu(Prompt::default(), &["dog", "cat"], MenuStyle::Numbered).unwrap();
//! println!("{} {}", age, pet);
//! ```
use std::{fmt::Display, net::IpAddr, path::PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::{
    error::PromptError,
    kinds::{
        Bool, Bounds, Choice, Custom, Date, DateTime, DayOfMonth, DayOfWeek, Email, Filename,
        Filepath, Float, Int, Ip, Matches, Menu, MenuStyle, Month, Num, Number, Password,
        RegexStr, Text, Time, Url, UsState, YesNo, Zip,
    },
    prompt::{Prompt, Response},
    utils::{Clock, LineSource, ParsedUrl, Terminal},
};

macro_rules! prompt_functions {
    ($(
        $(#[$meta:meta])*
        $name:ident($($arg:ident: $ty:ty),*) -> $out:ty => $kind:expr;
    )*) => {
        impl<S: LineSource, C: Clock> Terminal<S, C> {
            $(
                $(#[$meta])*
                pub fn $name(
                    &mut self,
                    prompt: Prompt<$out>,
                    $($arg: $ty),*
                ) -> Result<Response<$out>, PromptError> {
                    self.ask(prompt, $kind)
                }
            )*
        }

        $(
            $(#[$meta])*
            pub fn $name(prompt: Prompt<$out>, $($arg: $ty),*) -> Result<Response<$out>, PromptError> {
                Terminal::stdin().$name(prompt, $($arg),*)
            }
        )*
    };
}

prompt_functions! {
    /// Any non-blank text.
    input_str() -> String => Text;
    /// An integer or a decimal number.
    input_num(bounds: Bounds) -> Number => Num::new(bounds);
    /// A whole number.
    input_int(bounds: Bounds) -> i64 => Int::new(bounds);
    /// A floating point number.
    input_float(bounds: Bounds) -> f64 => Float::new(bounds);
    /// `True`/`False`, or `t`/`f`.
    input_bool() -> bool => Bool::default();
    /// `yes`/`no`, or `y`/`n`; returns the full word.
    input_yes_no() -> String => YesNo::default();
    /// One of `choices`, case-insensitively.
    input_choice(choices: &[&str]) -> String => Choice::new(choices.iter().copied());
    /// One of `choices`, listed in the prompt when it has no text of its own.
    input_menu(choices: &[&str], style: MenuStyle) -> String =>
        Menu::new(choices.iter().copied()).style(style);
    /// A date in one of the default formats.
    input_date() -> NaiveDate => Date::default();
    /// A date and time in one of the default formats.
    input_datetime() -> NaiveDateTime => DateTime::default();
    /// A time of day in one of the default formats.
    input_time() -> NaiveTime => Time::default();
    input_email() -> String => Email;
    input_url() -> ParsedUrl => Url;
    /// A path, optionally one that exists.
    input_filepath(must_exist: bool) -> PathBuf => Filepath::new().must_exist(must_exist);
    input_filename() -> String => Filename;
    input_ip() -> IpAddr => Ip;
    /// Text containing a match of `pattern`; returns the matched part.
    input_regex(pattern: &str) -> String => Matches::new(pattern);
    /// A regular expression, returned compiled.
    input_regex_str() -> Regex => RegexStr;
    input_month() -> String => Month;
    input_day_of_week() -> String => DayOfWeek;
    /// A day that exists in `month` of `year`.
    input_day_of_month(year: i32, month: u32) -> u32 => DayOfMonth::new(year, month);
    input_zip() -> String => Zip;
    /// A state name or abbreviation; returns the name when `return_name`,
    /// else the abbreviation.
    input_us_state(return_name: bool) -> String => UsState { return_name };
    /// Any text, read without being shown. Each character is echoed as
    /// `mask`, or nothing is echoed for `None`.
    input_password(mask: Option<char>) -> String => Password::new(mask);
}

impl<S: LineSource, C: Clock> Terminal<S, C> {
    /// Text accepted by `check`, whose `Err` is shown to the user as is.
    pub fn input_custom<T, E, F>(
        &mut self,
        prompt: Prompt<T>,
        check: F,
    ) -> Result<Response<T>, PromptError>
    where
        F: Fn(&str) -> Result<T, E>,
        E: Display,
    {
        self.ask(prompt, Custom::new(check))
    }
}

/// Text accepted by `check`, whose `Err` is shown to the user as is.
pub fn input_custom<T, E, F>(prompt: Prompt<T>, check: F) -> Result<Response<T>, PromptError>
where
    F: Fn(&str) -> Result<T, E>,
    E: Display,
{
    Terminal::stdin().input_custom(prompt, check)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        error::ConfigError,
        utils::{ManualClock, ScriptedSource, Strip, Written},
    };

    fn terminal(lines: &[&str]) -> Terminal<ScriptedSource, ManualClock> {
        let clock = ManualClock::new();
        let source = lines
            .iter()
            .fold(ScriptedSource::new(clock.clone()), |s, l| s.line(*l));
        Terminal::new(source, clock)
    }

    #[test]
    fn test_input_menu_numbered() {
        let mut term = terminal(&["3", "2"]);
        let pet = term
            .input_menu(Prompt::default(), &["dog", "cat"], MenuStyle::Numbered)
            .unwrap();

        assert_eq!(pet, Response::Value("cat".to_string()));
        assert_eq!(
            term.source().prompts()[0],
            "Please select one of the following:\n1. dog\n2. cat\n"
        );
        assert_eq!(term.source().messages(), vec!["'3' is not a valid choice."]);
    }

    #[test]
    fn test_input_num_bounds() {
        let mut term = terminal(&["3", "4.5"]);
        let n = term
            .input_num(Prompt::new("> "), Bounds::new().min(4).max(6))
            .unwrap();
        assert_eq!(n, Response::Value(Number::Float(4.5)));
        assert_eq!(term.source().messages(), vec!["Number must be at minimum 4."]);
    }

    #[test]
    fn test_input_yes_no_and_bool() {
        let mut term = terminal(&["maybe", "Y", "f"]);
        assert_eq!(
            term.input_yes_no(Prompt::new("> ")).unwrap(),
            Response::Value("yes".to_string())
        );
        assert_eq!(
            term.input_bool(Prompt::new("> ")).unwrap(),
            Response::Value(false)
        );
    }

    #[test]
    fn test_input_day_of_month() {
        let mut term = terminal(&["29", "28"]);
        let day = term
            .input_day_of_month(Prompt::new("Day: "), 2001, 2)
            .unwrap();
        assert_eq!(day, Response::Value(28));
        assert_eq!(
            term.source().messages(),
            vec!["'29' is not a day in the month of February 2001"]
        );
    }

    #[test]
    fn test_input_regex_with_default_on_timeout() {
        let clock = ManualClock::new();
        let source = ScriptedSource::new(clock.clone())
            .line_after(Duration::from_secs(3), "abc")
            .line_after(Duration::from_secs(3), "123");
        let mut term = Terminal::new(source, clock);

        let res = term
            .input_regex(
                Prompt::new("Code: ")
                    .timeout(Duration::from_secs(5))
                    .default_value("000".to_string()),
                r"\d+",
            )
            .unwrap();
        assert_eq!(res, Response::Default("000".to_string()));
    }

    #[test]
    fn test_input_custom() {
        let mut term = terminal(&["7", "8"]);
        let even = term
            .input_custom(Prompt::new("Even: "), |text: &str| match text.parse::<u32>() {
                Ok(n) if n % 2 == 0 => Ok(n),
                _ => Err(format!("'{}' is not even.", text)),
            })
            .unwrap();
        assert_eq!(even, Response::Value(8));
        assert_eq!(term.source().messages(), vec!["'7' is not even."]);
    }

    #[test]
    fn test_input_functions_with_post_and_apply() {
        let mut term = terminal(&["  HELLO  "]);
        let res = term
            .input_str(
                Prompt::new("> ")
                    .apply(|raw| raw.to_lowercase())
                    .post(|s: String| format!("{}!", s)),
            )
            .unwrap();
        assert_eq!(res, Response::Value("hello!".to_string()));
    }

    #[test]
    fn test_input_password_reads_masked_and_unstripped() {
        let mut term = terminal(&["", " s3cret "]);
        let (res, attempts) = term.ask_with_attempts(Prompt::new("Password: "), Password::default());

        assert_eq!(res.unwrap(), Response::Value(" s3cret ".to_string()));
        assert_eq!(
            term.source().transcript(),
            &[
                Written::Prompt("Password: ".to_string()),
                Written::Echoed(String::new()),
                Written::Message("Blank values are not allowed.".to_string()),
                Written::Prompt("Password: ".to_string()),
                Written::Echoed("********".to_string()),
            ]
        );
        assert_eq!(attempts[1].raw, "********");
        assert_eq!(attempts[1].text, "********");
    }

    #[test]
    fn test_input_password_mask_options() {
        let mut term = terminal(&["pw", "pw"]);
        term.input_password(Prompt::new("> "), None).unwrap();
        term.input_password(Prompt::new("> ").strip(Strip::Whitespace), Some('#'))
            .unwrap();
        let echoed: Vec<_> = term
            .source()
            .transcript()
            .iter()
            .filter(|w| matches!(w, Written::Echoed(_)))
            .cloned()
            .collect();
        assert_eq!(
            echoed,
            vec![Written::Echoed(String::new()), Written::Echoed("##".to_string())]
        );

        let res = term.input_password(Prompt::new("> "), Some('\u{7}'));
        assert!(matches!(res, Err(PromptError::Config(ConfigError::InvalidMask(_)))));
    }

    #[test]
    fn test_input_us_state() {
        let mut term = terminal(&["Ontario", "texas", "wa"]);
        assert_eq!(
            term.input_us_state(Prompt::new("State: "), false).unwrap(),
            Response::Value("TX".to_string())
        );
        assert_eq!(
            term.input_us_state(Prompt::new("State: "), true).unwrap(),
            Response::Value("Washington".to_string())
        );
        assert_eq!(term.source().messages(), vec!["'Ontario' is not a state."]);
    }

    #[test]
    fn test_input_url_and_ip() {
        let mut term = terminal(&["http://localhost:8080/x", "10.0.0.1"]);
        let url = term.input_url(Prompt::new("> ")).unwrap().into_value().unwrap();
        assert_eq!(url.port, Some(8080));
        let ip = term.input_ip(Prompt::new("> ")).unwrap().into_value().unwrap();
        assert!(ip.is_ipv4());
    }
}
