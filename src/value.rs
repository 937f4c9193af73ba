//! Dynamically typed field values.
//!
//! Accessors and mutators are invoked through type-erased handles, so values cross that boundary as a
//! [`FieldValue`]. The conversion traits are implemented for the scalar types a DTO field normally holds;
//! `Option<T>` maps `None` to [`FieldValue::Null`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A value read from an accessor or passed to a mutator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// A [`FieldValue`] could not be converted into the type a mutator expects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: &'static str },

    #[error("value {value} is out of range for {target}")]
    OutOfRange { value: i64, target: &'static str },

    #[error("value {value} is out of range for {target}")]
    FloatOutOfRange { value: f64, target: &'static str },

    /// The mutator accepted the converted value but returned an error.
    #[error("{message}")]
    Rejected { message: String },
}

/// Convert an accessor's return value into a [`FieldValue`].
pub trait IntoFieldValue {
    fn into_field_value(self) -> FieldValue;
}

/// Convert a [`FieldValue`] into a mutator's parameter type.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError>;
}

impl IntoFieldValue for FieldValue {
    fn into_field_value(self) -> FieldValue {
        self
    }
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Bool(self)
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(self)
    }
}

impl IntoFieldValue for &str {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Text(self.to_owned())
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(mismatch("text", &other)),
        }
    }
}

impl IntoFieldValue for f64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Float(self)
    }
}

impl IntoFieldValue for f32 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Float(f64::from(self))
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Float(x) => Ok(x),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
        // Precision is lost on narrowing; magnitude is not.
        let x = f64::from_field_value(value)?;
        let narrowed = x as f32;
        if x.is_finite() && narrowed.is_infinite() {
            return Err(ValueError::FloatOutOfRange { value: x, target: "f32" });
        }
        Ok(narrowed)
    }
}

macro_rules! int_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoFieldValue for $ty {
                fn into_field_value(self) -> FieldValue {
                    FieldValue::Int(i64::from(self))
                }
            }

            impl FromFieldValue for $ty {
                fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
                    match value {
                        FieldValue::Int(i) => <$ty>::try_from(i).map_err(|_| ValueError::OutOfRange {
                            value: i,
                            target: stringify!($ty),
                        }),
                        other => Err(mismatch(stringify!($ty), &other)),
                    }
                }
            }
        )*
    };
}

int_field_value!(i8, i16, i32, i64, u8, u16, u32);

impl<T: IntoFieldValue> IntoFieldValue for Option<T> {
    fn into_field_value(self) -> FieldValue {
        match self {
            Some(value) => value.into_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> Result<Self, ValueError> {
        match value {
            FieldValue::Null => Ok(None),
            other => T::from_field_value(other).map(Some),
        }
    }
}

fn mismatch(expected: &'static str, found: &FieldValue) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

macro_rules! from_for_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    value.into_field_value()
                }
            }
        )*
    };
}

from_for_field_value!(bool, i32, i64, f64, String, &str);

impl<T: IntoFieldValue> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.into_field_value()
    }
}
