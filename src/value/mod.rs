//! Type-erased argument and return values.
//!
//! Hooked functions are invoked through a uniform calling convention: an ordered
//! slice of [`Value`]s in, a single [`Value`] out. A [`Signature`] records the
//! [`ValueKind`] of every parameter and of the return value so that calls can be
//! checked at the boundary instead of failing somewhere inside the callee.
//!
//! # Key Types
//!
//! - [`Value`] - A single argument or return value
//! - [`ValueKind`] - The kind tag of a [`Value`], without payload
//! - [`Signature`] - Parameter kinds plus return kind of a callable
//!
//! # Examples
//!
//! ```rust
//! use hookscope::value::{Signature, Value, ValueKind};
//!
//! let sig = Signature::new(vec![ValueKind::I32, ValueKind::I32], ValueKind::I64);
//! assert!(sig.check_args(&[Value::I32(1), Value::I32(2)]).is_ok());
//! assert!(sig.check_args(&[Value::I32(1)]).is_err());
//! ```

mod signature;

pub use signature::Signature;

use strum::{EnumCount, EnumIter};

/// Runtime value passed to or returned from a hooked function.
///
/// `Value` covers the primitive shapes that show up in native call signatures,
/// plus owned strings and byte buffers for higher level targets.
///
/// | Rust type | Value Variant |
/// |-----------|---------------|
/// | `()` | [`Value::Void`] |
/// | `bool` | [`Value::Bool`] |
/// | `i32` | [`Value::I32`] |
/// | `i64` | [`Value::I64`] |
/// | `u64` | [`Value::U64`] |
/// | `f32` | [`Value::F32`] |
/// | `f64` | [`Value::F64`] |
/// | raw address | [`Value::Ptr`] |
/// | `String` / `&str` | [`Value::Str`] |
/// | `Vec<u8>` / `&[u8]` | [`Value::Bytes`] |
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value (void return).
    Void,
    /// Boolean value.
    Bool(bool),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 64-bit unsigned integer.
    U64(u64),
    /// 32-bit floating point.
    F32(f32),
    /// 64-bit floating point.
    F64(f64),
    /// Raw address. Never dereferenced by this crate.
    Ptr(usize),
    /// Owned UTF-8 string.
    Str(String),
    /// Owned byte buffer.
    Bytes(Vec<u8>),
}

/// Kind tag of a [`Value`].
///
/// Displayed in lowercase (`i32`, `str`, `void`, ...), which is also how
/// [`Signature`] renders itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    /// See [`Value::Void`]
    Void,
    /// See [`Value::Bool`]
    Bool,
    /// See [`Value::I32`]
    I32,
    /// See [`Value::I64`]
    I64,
    /// See [`Value::U64`]
    U64,
    /// See [`Value::F32`]
    F32,
    /// See [`Value::F64`]
    F64,
    /// See [`Value::Ptr`]
    Ptr,
    /// See [`Value::Str`]
    Str,
    /// See [`Value::Bytes`]
    Bytes,
}

impl Value {
    /// Returns the kind tag of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Void => ValueKind::Void,
            Value::Bool(_) => ValueKind::Bool,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Ptr(_) => ValueKind::Ptr,
            Value::Str(_) => ValueKind::Str,
            Value::Bytes(_) => ValueKind::Bytes,
        }
    }

    /// Returns `true` for [`Value::Void`].
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    /// Returns the boolean payload, if this is a [`Value::Bool`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload of a [`Value::I32`].
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload of a [`Value::I64`], widening a [`Value::I32`].
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            Value::I32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Returns the payload of a [`Value::U64`].
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload of a [`Value::F64`], widening a [`Value::F32`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            Value::F32(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    /// Returns the address held by a [`Value::Ptr`].
    #[must_use]
    pub fn as_ptr(&self) -> Option<usize> {
        match self {
            Value::Ptr(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrows the string held by a [`Value::Str`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Borrows the buffer held by a [`Value::Bytes`].
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Void
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::Void.kind(), ValueKind::Void);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(7i32).kind(), ValueKind::I32);
        assert_eq!(Value::from(7i64).kind(), ValueKind::I64);
        assert_eq!(Value::from(7u64).kind(), ValueKind::U64);
        assert_eq!(Value::from(1.5f32).kind(), ValueKind::F32);
        assert_eq!(Value::from(1.5f64).kind(), ValueKind::F64);
        assert_eq!(Value::Ptr(0x1000).kind(), ValueKind::Ptr);
        assert_eq!(Value::from("abc").kind(), ValueKind::Str);
        assert_eq!(Value::from(&b"abc"[..]).kind(), ValueKind::Bytes);
    }

    #[test]
    fn test_kind_display_lowercase() {
        let names: Vec<String> = ValueKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec!["void", "bool", "i32", "i64", "u64", "f32", "f64", "ptr", "str", "bytes"]
        );
        assert_eq!(names.len(), ValueKind::COUNT);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::I32(-3).as_i32(), Some(-3));
        assert_eq!(Value::I32(-3).as_i64(), Some(-3));
        assert_eq!(Value::F32(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Str("x".into()).as_str(), Some("x"));
        assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(Value::Bool(true).as_i32(), None);
        assert!(Value::from(()).is_void());
    }
}
