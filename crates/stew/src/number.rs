//! Numeric coercion of dynamically typed values.

use crate::error::{Error, Result};
use crate::strings;
use crate::value::Value;

/// A number coerced from an arbitrary [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Number(pub f64);

impl Number {
    pub const ZERO: Number = Number(0.0);
    pub const TRUE: Number = Number(1.0);
    pub const FALSE: Number = Number::ZERO;

    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Coerce `value` into a number.
    ///
    /// Strings are first interpreted with [`strings::parse`], so `"100"` is
    /// 100 and `"true"` is 1. A string that stays a string after parsing,
    /// such as the quoted `"'1'"`, is then read as a float. Booleans are 1 or
    /// 0. Null, arrays and maps coerce to [`Number::ZERO`].
    ///
    /// # Errors
    ///
    /// Returns `Error::NumberParse` if a string does not spell a number or a
    /// boolean.
    pub fn from_value(value: &Value) -> Result<Number> {
        match value {
            Value::Str(s) => match strings::parse(s) {
                Value::Str(inner) => inner
                    .parse::<f64>()
                    .map(Number)
                    .map_err(|_| Error::NumberParse(s.clone())),
                parsed => Self::from_value(&parsed),
            },
            Value::Bool(true) => Ok(Number::TRUE),
            Value::Bool(false) => Ok(Number::FALSE),
            Value::Int(n) => Ok(Number::from(*n)),
            Value::Float(f) => Ok(Number(*f)),
            Value::Null | Value::Array(_) | Value::Map(_) => Ok(Number::ZERO),
        }
    }
}

impl From<Number> for f64 {
    fn from(n: Number) -> Self {
        n.0
    }
}

impl From<bool> for Number {
    fn from(b: bool) -> Self {
        if b { Number::TRUE } else { Number::FALSE }
    }
}

macro_rules! from_lossless {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number(f64::from(n))
                }
            }
        )*
    };
}

from_lossless!(i8, i16, i32, u8, u16, u32, f32, f64);

macro_rules! from_wide {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                #[allow(clippy::cast_precision_loss)]
                fn from(n: $t) -> Self {
                    Number(n as f64)
                }
            }
        )*
    };
}

from_wide!(i64, u64, isize, usize);
