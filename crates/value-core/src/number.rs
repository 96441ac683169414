//! Canonical numeric representation for [`JsonValue::Number`](crate::JsonValue::Number).
//!
//! Every JSON number is held in exactly one of three cases:
//!
//! - `PosInt` for every non-negative integer (`0..=u64::MAX`)
//! - `NegInt` for every negative integer (`i64::MIN..0`)
//! - `Float` for finite IEEE doubles (guaranteed by [`Number::from_f64`];
//!   a hand-built non-finite `Float` is rejected when serialized)
//!
//! The case is chosen by the native type a value came from: integer widths
//! always land in the integer cases and `f32`/`f64` always land in `Float`,
//! even when the float has no fractional part. Two numbers are equal only when
//! they share a case, so `PosInt(1) != Float(1.0)`.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A JSON number.
#[derive(Debug, Copy, Clone)]
pub enum Number {
    /// Non-negative integer.
    PosInt(u64),
    /// Negative integer.
    NegInt(i64),
    /// Finite floating point value.
    Float(f64),
}

impl Number {
    /// Create a float number, returning `None` for NaN and infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        if f.is_finite() {
            Some(Self::Float(f))
        } else {
            None
        }
    }

    /// Check if this number was produced from an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::PosInt(_) | Self::NegInt(_))
    }

    /// Check if this number was produced from a float.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Get this number as an i64 if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::PosInt(u) => i64::try_from(u).ok(),
            Self::NegInt(i) => Some(i),
            Self::Float(_) => None,
        }
    }

    /// Get this number as a u64 if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::PosInt(u) => Some(u),
            _ => None,
        }
    }

    /// Get this number as an f64. Large integers lose precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::PosInt(u) => u as f64,
            Self::NegInt(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(u: $ty) -> Self {
                    Number::PosInt(u as u64)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(i: $ty) -> Self {
                    if i < 0 {
                        Number::NegInt(i as i64)
                    } else {
                        Number::PosInt(i as u64)
                    }
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::PosInt(a), Number::PosInt(b)) => a == b,
            (Number::NegInt(a), Number::NegInt(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

// Bitwise fallback keeps a hand-built `Float(NaN)` equal to itself.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, h: &mut H) {
        std::mem::discriminant(self).hash(h);
        match *self {
            Number::PosInt(u) => u.hash(h),
            Number::NegInt(i) => i.hash(h),
            Number::Float(f) => {
                if f == 0.0f64 {
                    0.0f64.to_bits().hash(h);
                } else {
                    f.to_bits().hash(h);
                }
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::PosInt(u) => write!(f, "{u}"),
            Number::NegInt(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}
