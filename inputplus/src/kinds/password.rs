//! [`Password`]: any text, read without showing what is typed.
use crate::{
    error::ConfigError,
    utils::{Echo, Rejection, Strip, Validate},
};

/// A secret answer. Each typed character is shown as `mask`, or nothing is
/// shown when there is no mask.
///
/// Passwords are not stripped unless the prompt asks for it, and attempt
/// records keep only the masked form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Password {
    pub mask: Option<char>,
}

impl Default for Password {
    fn default() -> Self {
        Password { mask: Some('*') }
    }
}

impl Password {
    pub fn new(mask: Option<char>) -> Self {
        Password { mask }
    }
}

impl Validate for Password {
    type Output = String;

    fn validate(&self, input: &str) -> Result<String, Rejection> {
        Ok(input.to_string())
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        match self.mask {
            Some(mask) if mask.is_control() => Err(ConfigError::InvalidMask(mask)),
            _ => Ok(()),
        }
    }

    fn default_strip(&self) -> Strip {
        Strip::Off
    }

    fn echo(&self) -> Echo {
        match self.mask {
            Some(mask) => Echo::Mask(mask),
            None => Echo::Hidden,
        }
    }
}
