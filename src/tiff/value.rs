use crate::error::{TiffMetaError, TiffMetaResult};

use self::Value::{
    Ascii, Byte, Double, Float, List, Rational, SRational, Short, Signed, SignedByte, SignedShort,
    Undefined, Unsigned,
};

/// A single decoded element of an IFD field.
///
/// Fields hold one `Value` per element; [`Value::List`] only appears when several elements are
/// collapsed into one value, as for GeoKeys that reference a slice of an overflow tag.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    Byte(u8),
    Short(u16),
    SignedByte(i8),
    SignedShort(i16),
    Signed(i32),
    Unsigned(u32),
    Float(f32),
    Double(f64),
    List(Vec<Value>),
    Rational(u32, u32),
    SRational(i32, i32),
    Ascii(String),
    Undefined(u8),
}

fn unexpected(expected: &'static str, found: Value) -> TiffMetaError {
    TiffMetaError::UnexpectedValue { expected, found }
}

impl Value {
    /// Collapse decoded elements into one value: a scalar for one element, a list otherwise.
    pub fn from_elements(mut values: Vec<Value>) -> Value {
        if values.len() == 1 {
            values.remove(0)
        } else {
            List(values)
        }
    }

    /// The element as a byte.
    pub fn into_u8(self) -> TiffMetaResult<u8> {
        match self {
            Byte(val) | Undefined(val) => Ok(val),
            val => Err(unexpected("byte", val)),
        }
    }

    /// The element as a `u16`, if it fits.
    pub fn into_u16(self) -> TiffMetaResult<u16> {
        match self {
            Byte(val) => Ok(val.into()),
            Short(val) => Ok(val),
            Unsigned(val) => Ok(u16::try_from(val)?),
            val => Err(unexpected("short", val)),
        }
    }

    /// Any unsigned integer element as a `u32`.
    pub fn into_u32(self) -> TiffMetaResult<u32> {
        match self {
            Byte(val) => Ok(val.into()),
            Short(val) => Ok(val.into()),
            Unsigned(val) => Ok(val),
            val => Err(unexpected("unsigned integer", val)),
        }
    }

    /// Any unsigned integer element as a `u64`.
    pub fn into_u64(self) -> TiffMetaResult<u64> {
        self.into_u32().map(u64::from)
    }

    /// Any numeric element as a double; rationals are divided out.
    pub fn into_f64(self) -> TiffMetaResult<f64> {
        match self {
            Byte(val) | Undefined(val) => Ok(val.into()),
            Short(val) => Ok(val.into()),
            SignedByte(val) => Ok(val.into()),
            SignedShort(val) => Ok(val.into()),
            Signed(val) => Ok(val.into()),
            Unsigned(val) => Ok(val.into()),
            Float(val) => Ok(val.into()),
            Double(val) => Ok(val),
            Rational(n, d) => Ok(n as f64 / d as f64),
            SRational(n, d) => Ok(n as f64 / d as f64),
            val => Err(unexpected("number", val)),
        }
    }

    /// The text of an ASCII run.
    pub fn into_string(self) -> TiffMetaResult<String> {
        match self {
            Ascii(val) => Ok(val),
            val => Err(unexpected("ascii", val)),
        }
    }

    /// A scalar or a list as `u16`s.
    pub fn into_u16_vec(self) -> TiffMetaResult<Vec<u16>> {
        match self {
            List(vec) => vec.into_iter().map(Value::into_u16).collect(),
            val => Ok(vec![val.into_u16()?]),
        }
    }

    /// A scalar or a list as `u64`s.
    pub fn into_u64_vec(self) -> TiffMetaResult<Vec<u64>> {
        match self {
            List(vec) => vec.into_iter().map(Value::into_u64).collect(),
            val => Ok(vec![val.into_u64()?]),
        }
    }

    /// A scalar or a list as `f64`s.
    pub fn into_f64_vec(self) -> TiffMetaResult<Vec<f64>> {
        match self {
            List(vec) => vec.into_iter().map(Value::into_f64).collect(),
            val => Ok(vec![val.into_f64()?]),
        }
    }
}
