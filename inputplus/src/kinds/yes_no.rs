//! Two-way answers: [`YesNo`] returns the canonical word, [`Bool`] a `bool`.
//!
//! Either word or its first letter is accepted (`y`, `Yes`, `YES` for the
//! defaults), case-insensitively unless `case_sensitive` is set. The
//! one-letter shortcut is only offered when the two words start differently.
use crate::{
    error::ConfigError,
    utils::{Rejection, Validate},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YesNo {
    yes: String,
    no: String,
    case_sensitive: bool,
}

impl Default for YesNo {
    fn default() -> Self {
        YesNo::new("yes", "no")
    }
}

impl YesNo {
    pub fn new(yes: impl Into<String>, no: impl Into<String>) -> Self {
        YesNo {
            yes: yes.into(),
            no: no.into(),
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn same(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.to_lowercase() == b.to_lowercase()
        }
    }

    fn initial(word: &str) -> &str {
        word.char_indices()
            .nth(1)
            .map_or(word, |(end, _)| &word[..end])
    }

    /// `Some(true)` for yes, `Some(false)` for no.
    fn decide(&self, input: &str) -> Option<bool> {
        if self.same(input, &self.yes) {
            return Some(true);
        }
        if self.same(input, &self.no) {
            return Some(false);
        }

        let (y, n) = (Self::initial(&self.yes), Self::initial(&self.no));
        if self.same(y, n) {
            return None;
        }
        if self.same(input, y) {
            Some(true)
        } else if self.same(input, n) {
            Some(false)
        } else {
            None
        }
    }

    fn rejection(&self, input: &str) -> Rejection {
        Rejection::InvalidYesNo {
            value: input.to_string(),
            yes: self.yes.clone(),
            no: self.no.clone(),
        }
    }
}

impl Validate for YesNo {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        match self.decide(input) {
            Some(true) => Ok(self.yes.clone()),
            Some(false) => Ok(self.no.clone()),
            None => Err(self.rejection(input)),
        }
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        if self.yes.is_empty() || self.no.is_empty() || self.same(&self.yes, &self.no) {
            return Err(ConfigError::AmbiguousYesNo {
                yes: self.yes.clone(),
                no: self.no.clone(),
            });
        }
        Ok(())
    }
}

/// `true`/`false` answer; the words default to `True` and `False`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bool {
    words: YesNo,
}

impl Default for Bool {
    fn default() -> Self {
        Bool::new("True", "False")
    }
}

impl Bool {
    pub fn new(true_word: impl Into<String>, false_word: impl Into<String>) -> Self {
        Bool {
            words: YesNo::new(true_word, false_word),
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.words = self.words.case_sensitive(case_sensitive);
        self
    }
}

impl Validate for Bool {
    type Output = bool;

    fn validate(&self, input: &str) -> Result<bool, Rejection> {
        self.words
            .decide(input)
            .ok_or_else(|| self.words.rejection(input))
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        self.words.check_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_words_and_initials() {
        let yn = YesNo::default();
        assert_eq!(yn.validate("yes"), Ok("yes".to_string()));
        assert_eq!(yn.validate("Y"), Ok("yes".to_string()));
        assert_eq!(yn.validate("NO"), Ok("no".to_string()));
        assert_eq!(yn.validate("n"), Ok("no".to_string()));
        assert_eq!(
            yn.validate("maybe").unwrap_err().to_string(),
            "'maybe' is not a valid yes/no response."
        );
    }

    #[test]
    fn test_yes_no_custom_words() {
        let yn = YesNo::new("oui", "non");
        assert_eq!(yn.validate("OUI"), Ok("oui".to_string()));
        assert_eq!(yn.validate("o"), Ok("oui".to_string()));
        assert_eq!(yn.validate("n"), Ok("non".to_string()));
    }

    #[test]
    fn test_yes_no_shared_initial_disables_shortcut() {
        let yn = YesNo::new("nope", "no");
        assert_eq!(yn.validate("nope"), Ok("nope".to_string()));
        assert!(yn.validate("n").is_err());
    }

    #[test]
    fn test_yes_no_case_sensitive() {
        let yn = YesNo::default().case_sensitive(true);
        assert!(yn.validate("Yes").is_err());
        assert_eq!(yn.validate("y"), Ok("yes".to_string()));
    }

    #[test]
    fn test_yes_no_config_errors() {
        assert!(matches!(
            YesNo::new("ok", "OK").check_config(),
            Err(ConfigError::AmbiguousYesNo { .. })
        ));
        assert!(YesNo::new("ok", "OK").case_sensitive(true).check_config().is_ok());
    }

    #[test]
    fn test_bool() {
        let b = Bool::default();
        assert_eq!(b.validate("true"), Ok(true));
        assert_eq!(b.validate("F"), Ok(false));
        assert_eq!(
            b.validate("1").unwrap_err().to_string(),
            "'1' is not a valid True/False response."
        );
    }
}
