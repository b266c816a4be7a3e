//! Numeric prompt kinds: [`Num`], [`Int`] and [`Float`], sharing [`Bounds`].
//!
//! `min`/`max` are inclusive, `greater_than`/`less_than` exclusive. Every
//! bound given is enforced, so `min(4).greater_than(5)` effectively means
//! "greater than 5". Contradictory combinations that leave no acceptable
//! number are reported as [`ConfigError`]s before the first prompt.
use std::{fmt::Display, num::IntErrorKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    utils::{Rejection, Validate, check_type},
};

/// Natural value of the generic [`Num`] kind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(f) => *f,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Numbers usable as a [`Bounds`] limit. Integers wider than 53 bits are
/// rounded to the nearest `f64`.
pub trait BoundValue {
    fn to_f64(self) -> f64;
}

macro_rules! bound_value {
    ($($t:ty),*) => {
        $(
            impl BoundValue for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

bound_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Inclusive and exclusive limits on a numeric answer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub greater_than: Option<f64>,
    pub less_than: Option<f64>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: impl BoundValue) -> Self {
        self.min = Some(min.to_f64());
        self
    }

    pub fn max(mut self, max: impl BoundValue) -> Self {
        self.max = Some(max.to_f64());
        self
    }

    pub fn greater_than(mut self, bound: impl BoundValue) -> Self {
        self.greater_than = Some(bound.to_f64());
        self
    }

    pub fn less_than(mut self, bound: impl BoundValue) -> Self {
        self.less_than = Some(bound.to_f64());
        self
    }

    /// Rejects bound sets that are malformed or leave no acceptable number.
    pub fn check(&self) -> Result<(), ConfigError> {
        for (name, bound) in [
            ("min", self.min),
            ("max", self.max),
            ("greater_than", self.greater_than),
            ("less_than", self.less_than),
        ] {
            if bound.is_some_and(|b| !b.is_finite()) {
                return Err(ConfigError::NotFinite(name));
            }
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::MinAboveMax { min, max });
            }
        }

        let empty = |reason: String| Err(ConfigError::EmptyRange(reason));

        if let (Some(gt), Some(lt)) = (self.greater_than, self.less_than) {
            if gt >= lt {
                return empty(format!("greater_than {} is not below less_than {}", gt, lt));
            }
        }
        if let (Some(min), Some(lt)) = (self.min, self.less_than) {
            if min >= lt {
                return empty(format!("min {} is not below less_than {}", min, lt));
            }
        }
        if let (Some(gt), Some(max)) = (self.greater_than, self.max) {
            if gt >= max {
                return empty(format!("greater_than {} is not below max {}", gt, max));
            }
        }

        Ok(())
    }

    /// Checks `value` against every bound, in min, max, greater_than, less_than order.
    pub fn contains(&self, value: f64) -> Result<(), Rejection> {
        if let Some(min) = self.min {
            if value < min {
                return Err(Rejection::BelowMinimum(min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(Rejection::AboveMaximum(max));
            }
        }
        if let Some(gt) = self.greater_than {
            if value <= gt {
                return Err(Rejection::NotGreaterThan(gt));
            }
        }
        if let Some(lt) = self.less_than {
            if value >= lt {
                return Err(Rejection::NotLessThan(lt));
            }
        }
        Ok(())
    }
}

/// `Ok(None)` when `input` is not an integer literal at all.
fn parse_int(input: &str) -> Result<Option<i64>, Rejection> {
    match input.parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(Rejection::IntegerOutOfRange(input.to_string()))
            }
            _ => Ok(None),
        },
    }
}

fn parse_float(input: &str) -> Result<f64, Rejection> {
    let value: f64 = check_type!(input, f64, Rejection::NotANumber(input.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Rejection::NotANumber(input.to_string()))
    }
}

/// Any number. A `.` in the answer makes it a [`Number::Float`], otherwise
/// it must be an integer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Num {
    pub bounds: Bounds,
}

impl Num {
    pub fn new(bounds: Bounds) -> Self {
        Num { bounds }
    }
}

impl Validate for Num {
    type Output = Number;

    fn validate(&self, input: &str) -> Result<Number, Rejection> {
        let number = if input.contains('.') {
            Number::Float(parse_float(input)?)
        } else {
            let value = parse_int(input)?;
            Number::Int(value.ok_or_else(|| Rejection::NotANumber(input.to_string()))?)
        };
        self.bounds.contains(number.as_f64())?;
        Ok(number)
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        self.bounds.check()
    }
}

/// A whole number. Integral decimals such as `42.0` are accepted as `42`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Int {
    pub bounds: Bounds,
}

impl Int {
    pub fn new(bounds: Bounds) -> Self {
        Int { bounds }
    }
}

impl Validate for Int {
    type Output = i64;

    fn validate(&self, input: &str) -> Result<i64, Rejection> {
        let value = match parse_int(input)? {
            Some(value) => value,
            None => {
                let float = parse_float(input)?;
                if float.fract() != 0.0 {
                    return Err(Rejection::NotAnInteger(input.to_string()));
                }
                // i64::MAX as f64 rounds up to 2^63, which does not fit.
                if float >= i64::MAX as f64 || float < i64::MIN as f64 {
                    return Err(Rejection::IntegerOutOfRange(input.to_string()));
                }
                float as i64
            }
        };
        self.bounds.contains(value as f64)?;
        Ok(value)
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        self.bounds.check()
    }
}

/// A floating point number; `42` is returned as `42.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Float {
    pub bounds: Bounds,
}

impl Float {
    pub fn new(bounds: Bounds) -> Self {
        Float { bounds }
    }
}

impl Validate for Float {
    type Output = f64;

    fn validate(&self, input: &str) -> Result<f64, Rejection> {
        let value = parse_float(input)?;
        self.bounds.contains(value)?;
        Ok(value)
    }

    fn check_config(&self) -> Result<(), ConfigError> {
        self.bounds.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    #[test]
    fn test_num_int_or_float_by_decimal_point() {
        let num = Num::default();
        assert_eq!(num.validate("9"), Ok(Number::Int(9)));
        assert_eq!(num.validate("9.0"), Ok(Number::Float(9.0)));
        assert_eq!(num.validate("-3.5"), Ok(Number::Float(-3.5)));
        assert_eq!(
            num.validate("forty two").unwrap_err().to_string(),
            "'forty two' is not a number."
        );
        assert!(num.validate("inf").is_err());
        assert!(num.validate("NaN.").is_err());
    }

    #[test]
    fn test_min_max_inclusive_boundaries() {
        let num = Num::new(Bounds::new().min(4).max(6));
        assert_eq!(num.validate("4"), Ok(Number::Int(4)));
        assert_eq!(num.validate("6"), Ok(Number::Int(6)));
        assert_eq!(
            num.validate("3").unwrap_err().to_string(),
            "Number must be at minimum 4."
        );
        assert_eq!(
            num.validate("7").unwrap_err().to_string(),
            "Number must be at maximum 6."
        );
    }

    #[test]
    fn test_greater_less_exclusive_boundaries() {
        let num = Num::new(Bounds::new().greater_than(4).less_than(6));
        assert_eq!(
            num.validate("4").unwrap_err().to_string(),
            "Number must be greater than 4."
        );
        assert_eq!(
            num.validate("6").unwrap_err().to_string(),
            "Number must be less than 6."
        );
        assert_eq!(num.validate("4.1"), Ok(Number::Float(4.1)));
        assert_eq!(num.validate("5"), Ok(Number::Int(5)));
    }

    #[test]
    fn test_tightest_bound_wins() {
        let int = Int::new(Bounds::new().min(4).greater_than(5));
        assert_eq!(int.validate("5"), Err(Rejection::NotGreaterThan(5.0)));
        assert_eq!(int.validate("3"), Err(Rejection::BelowMinimum(4.0)));
        assert_eq!(int.validate("6"), Ok(6));
    }

    #[test]
    fn test_int_accepts_integral_decimals() {
        let int = Int::default();
        assert_eq!(int.validate("42"), Ok(42));
        assert_eq!(int.validate("42.0"), Ok(42));
        assert_eq!(
            int.validate("4.5").unwrap_err().to_string(),
            "'4.5' is not an integer."
        );
        assert_eq!(
            int.validate("dog").unwrap_err().to_string(),
            "'dog' is not a number."
        );
    }

    #[test]
    fn test_integers_beyond_i64_are_rejected() {
        let int = Int::default();
        assert_eq!(
            int.validate("9223372036854775900").unwrap_err().to_string(),
            "'9223372036854775900' is too large to be stored as an integer."
        );
        assert_eq!(
            int.validate("-9223372036854775809"),
            Err(Rejection::IntegerOutOfRange("-9223372036854775809".to_string()))
        );
        assert_eq!(
            int.validate("9223372036854775808.0"),
            Err(Rejection::IntegerOutOfRange("9223372036854775808.0".to_string()))
        );
        assert_eq!(int.validate("1e19"), Err(Rejection::IntegerOutOfRange("1e19".to_string())));
        assert_eq!(int.validate("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(int.validate("-9223372036854775808"), Ok(i64::MIN));

        let num = Num::default();
        assert_eq!(
            num.validate("9223372036854775808"),
            Err(Rejection::IntegerOutOfRange("9223372036854775808".to_string()))
        );
        assert_eq!(num.validate("-12"), Ok(Number::Int(-12)));
    }

    #[test]
    fn test_bounds_take_any_primitive_number() {
        let low: i64 = -3;
        let high: usize = 3;
        let bounds = Bounds::new().min(low).max(high).greater_than(-2.5f32).less_than(3u8);
        assert_eq!(bounds.min, Some(-3.0));
        assert_eq!(bounds.max, Some(3.0));
        assert_eq!(bounds.greater_than, Some(-2.5));
        assert_eq!(bounds.less_than, Some(3.0));

        let int = Int::new(bounds);
        assert_eq!(int.validate("2"), Ok(2));
        assert_eq!(int.validate("3"), Err(Rejection::NotLessThan(3.0)));
    }

    #[test]
    fn test_float_always_float() {
        let float = Float::new(Bounds::new().max(100));
        assert_eq!(float.validate("42"), Ok(42.0));
        assert_eq!(float.validate("1e2"), Ok(100.0));
        assert_eq!(float.validate("100.5"), Err(Rejection::AboveMaximum(100.0)));
    }

    #[test]
    fn test_bounds_config_errors() {
        assert!(matches!(
            Bounds::new().min(6).max(4).check(),
            Err(ConfigError::MinAboveMax { .. })
        ));
        assert!(matches!(
            Bounds::new().greater_than(6).less_than(6).check(),
            Err(ConfigError::EmptyRange(_))
        ));
        assert!(matches!(
            Bounds::new().min(5).less_than(5).check(),
            Err(ConfigError::EmptyRange(_))
        ));
        assert!(matches!(
            Bounds::new().greater_than(5).max(5).check(),
            Err(ConfigError::EmptyRange(_))
        ));
        assert!(matches!(
            Bounds::new().min(f64::NAN).check(),
            Err(ConfigError::NotFinite("min"))
        ));
        assert!(Bounds::new().min(4).max(4).check().is_ok());
        assert!(Bounds::new().min(4).less_than(6).greater_than(3).check().is_ok());
    }

    #[test]
    fn test_values_inside_bounds_are_accepted() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let int = Int::new(Bounds::new().min(-50).max(50));
        let float = Float::new(Bounds::new().greater_than(-1).less_than(1));

        for _ in 0..500 {
            let n: i64 = rng.random_range(-50..=50);
            assert_eq!(int.validate(&n.to_string()), Ok(n));

            let out: i64 = rng.random_range(51..10_000);
            assert!(int.validate(&out.to_string()).is_err());
            assert!(int.validate(&(-out).to_string()).is_err());

            let x: f64 = rng.random_range(-0.999..0.999);
            assert_eq!(float.validate(&x.to_string()), Ok(x));
        }
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Int(42).to_string(), "42");
        assert_eq!(Number::Float(42.0).to_string(), "42.0");
        assert_eq!(Number::Float(4.1).to_string(), "4.1");
    }
}
