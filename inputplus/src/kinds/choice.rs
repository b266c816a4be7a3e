//! Choosing one string out of a fixed list: [`Choice`] and [`Menu`].
//!
//! Matching trims and lowercases both sides unless `case_sensitive` is set.
//! The answer is always the choice as it was written in the list, never the
//! user's casing (`"DoG"` → `"dog"`).
//!
//! A [`Menu`] additionally renders its list into the prompt and, when
//! numbered or lettered, accepts the item's number or letter.
//!
//! ```text
//! Please select one of the following:
//! 1. dog
//! 2. cat
//! ```
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    utils::{Rejection, Validate},
};

const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// One of a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    choices: Vec<String>,
    case_sensitive: bool,
}

impl Choice {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Choice {
            choices: choices.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    fn normalize(&self, s: &str) -> String {
        if self.case_sensitive {
            s.trim().to_string()
        } else {
            s.trim().to_lowercase()
        }
    }

    fn find(&self, input: &str) -> Option<&String> {
        let wanted = self.normalize(input);
        self.choices.iter().find(|c| self.normalize(c) == wanted)
    }
}

impl Validate for Choice {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        self.find(input)
            .cloned()
            .ok_or_else(|| Rejection::InvalidChoice(input.to_string()))
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        if self.choices.len() < 2 {
            return Err(ConfigError::TooFewChoices(self.choices.len()));
        }

        let mut seen = HashSet::new();
        for choice in &self.choices {
            if !seen.insert(self.normalize(choice)) {
                return Err(ConfigError::DuplicateChoice(choice.clone()));
            }
        }
        Ok(())
    }

    fn default_prompt(&self) -> Option<String> {
        Some(format!("Please select one of: {}\n", self.choices.join(", ")))
    }
}

/// How a [`Menu`] lists its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MenuStyle {
    /// `* dog`
    #[default]
    Bulleted,
    /// `A. dog`
    Lettered,
    /// `1. dog`
    Numbered,
}

/// A [`Choice`] presented as a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    choice: Choice,
    style: MenuStyle,
}

impl Menu {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Menu {
            choice: Choice::new(choices),
            style: MenuStyle::default(),
        }
    }

    pub fn style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.choice = self.choice.case_sensitive(case_sensitive);
        self
    }

    /// Renders the menu in its style, one item per line.
    pub fn render(&self) -> String {
        let mut text = String::from("Please select one of the following:\n");
        for (i, choice) in self.choice.choices.iter().enumerate() {
            let line = match self.style {
                MenuStyle::Bulleted => format!("* {}\n", choice),
                MenuStyle::Numbered => format!("{}. {}\n", i + 1, choice),
                MenuStyle::Lettered => {
                    let letter = LETTERS.chars().nth(i).unwrap_or('?');
                    format!("{}. {}\n", letter, choice)
                }
            };
            text.push_str(&line);
        }
        text
    }

    fn by_marker(&self, input: &str) -> Option<&String> {
        let marker = input.trim();
        match self.style {
            MenuStyle::Bulleted => None,
            MenuStyle::Numbered => {
                let n: usize = marker.parse().ok()?;
                n.checked_sub(1).and_then(|i| self.choice.choices.get(i))
            }
            MenuStyle::Lettered => {
                let mut chars = marker.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return None;
                };
                let c = if self.choice.case_sensitive {
                    c
                } else {
                    c.to_ascii_uppercase()
                };
                LETTERS
                    .chars()
                    .position(|l| l == c)
                    .and_then(|i| self.choice.choices.get(i))
            }
        }
    }
}

impl Validate for Menu {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        // Literal choice text wins over a marker, so a choice named "2" stays reachable.
        self.choice
            .find(input)
            .or_else(|| self.by_marker(input))
            .cloned()
            .ok_or_else(|| Rejection::InvalidChoice(input.to_string()))
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        self.choice.check_config()?;
        if self.style == MenuStyle::Lettered && self.choice.choices.len() > LETTERS.len() {
            return Err(ConfigError::TooManyLettered(self.choice.choices.len()));
        }
        Ok(())
    }

    fn default_prompt(&self) -> Option<String> {
        Some(self.render())
    }
}
