//! Capability classification for rhai values
//!
//! A `Dynamic` can satisfy several capability checks at once, so every value
//! is classified exactly once, in a fixed precedence order, before encoding:
//!
//! null → boolean → integer → float → byte-string → text-string → sequence → mapping
//!
//! The first match wins. Anything left over is [`ValueKind::Unsupported`].

use rhai::Dynamic;

/// An integer widened losslessly to 128 bits, keeping its signedness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WideInt {
    Signed(i128),
    Unsigned(u128),
}

impl WideInt {
    /// The value as `i64`, if it is representable without loss
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Self::Signed(n) => i64::try_from(n).ok(),
            Self::Unsigned(n) => i64::try_from(n).ok(),
        }
    }

    /// The value as `u64`, if it is representable without loss
    pub fn to_u64(self) -> Option<u64> {
        match self {
            Self::Signed(n) => u64::try_from(n).ok(),
            Self::Unsigned(n) => u64::try_from(n).ok(),
        }
    }
}

impl std::fmt::Display for WideInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signed(n) => write!(f, "{}", n),
            Self::Unsigned(n) => write!(f, "{}", n),
        }
    }
}

/// The capability a value was classified under
///
/// Scalars carry their value. Containers and strings are read by the encoder
/// through the value's lock so shared values are never copied wholesale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    Null,
    Bool(bool),
    Integer(WideInt),
    Float(f64),
    Bytes,
    Text,
    Char(char),
    Sequence,
    Mapping,
    Unsupported,
}

/// Classify a value by its first matching capability
pub fn classify(value: &Dynamic) -> ValueKind {
    if value.is_unit() {
        return ValueKind::Null;
    }
    if let Ok(b) = value.as_bool() {
        return ValueKind::Bool(b);
    }
    if let Some(n) = integer(value) {
        return ValueKind::Integer(n);
    }
    if let Some(f) = float(value) {
        return ValueKind::Float(f);
    }
    if value.is_blob() {
        return ValueKind::Bytes;
    }
    if value.is_string() {
        return ValueKind::Text;
    }
    if let Ok(c) = value.as_char() {
        return ValueKind::Char(c);
    }
    if value.is_array() {
        return ValueKind::Sequence;
    }
    if value.is_map() {
        return ValueKind::Mapping;
    }
    ValueKind::Unsupported
}

fn integer(value: &Dynamic) -> Option<WideInt> {
    if let Ok(n) = value.as_int() {
        return Some(WideInt::Signed(i128::from(n)));
    }

    // Integers of other widths live in a Dynamic as custom values.
    macro_rules! probe {
        ($variant:ident as $wide:ty: $($t:ty),*) => {
            $(
                if let Some(n) = value.read_lock::<$t>() {
                    return Some(WideInt::$variant(*n as $wide));
                }
            )*
        };
    }
    probe!(Signed as i128: i8, i16, i32, i64, i128, isize);
    probe!(Unsigned as u128: u8, u16, u32, u64, u128, usize);
    None
}

fn float(value: &Dynamic) -> Option<f64> {
    if let Ok(f) = value.as_float() {
        return Some(f);
    }
    value.read_lock::<f32>().map(|f| f64::from(*f))
}
