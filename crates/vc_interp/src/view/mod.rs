//! Read-only views of the live tree.
//!
//! A view pairs an entry with the root it belongs to, since reading a
//! string entry means resolving its placeholders against that root.

// -----------------------------------------------------------------------------
// Modules

mod container;
mod number;

// -----------------------------------------------------------------------------
// Exports

pub use container::{ArrayRef, ObjectRef};

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use serde_json::{Number, Value};
use vc_path::{AccessErrorKind, Accessor, Traverse};

use crate::Scalar;

// -----------------------------------------------------------------------------
// Current

/// The current value of an entry.
///
/// Strings are already evaluated; containers are views that evaluate their
/// members on access.
///
/// `Display` follows the JavaScript string conversion: `undefined`, `null`,
/// numbers without a trailing `.0`, `[object Object]` for objects and
/// comma-joined elements for arrays.
#[derive(Debug, Clone, Default)]
pub enum Current<'r> {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(ObjectRef<'r>),
    Array(ArrayRef<'r>),
}

impl<'r> Current<'r> {
    /// Returns the JavaScript type name of the value, `array` for arrays.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.as_f64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(value) => value.as_i64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(value) => value.as_u64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<ObjectRef<'r>> {
        match self {
            Self::Object(object) => Some(*object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<ArrayRef<'r>> {
        match self {
            Self::Array(array) => Some(*array),
            _ => None,
        }
    }

    /// Unwraps the value into plain JSON, evaluating every string.
    ///
    /// `undefined` object members are skipped; `undefined` array elements
    /// and a top-level `undefined` become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Undefined | Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => Value::Number(value.clone()),
            Self::String(value) => Value::String(value.clone()),
            Self::Object(object) => object.to_json(),
            Self::Array(array) => array.to_json(),
        }
    }

    /// Appends the value as it appears inside a template.
    ///
    /// Same as `Display`, except that `undefined` and `null` contribute nothing.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Self::Undefined | Self::Null => {}
            Self::String(value) => out.push_str(value),
            other => {
                let _ = write!(out, "{other}");
            }
        }
    }
}

impl From<bool> for Current<'_> {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<usize> for Current<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<String> for Current<'_> {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&Scalar> for Current<'_> {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Undefined => Self::Undefined,
            Scalar::Null => Self::Null,
            Scalar::Bool(value) => Self::Bool(*value),
            Scalar::Number(value) => Self::Number(value.clone()),
        }
    }
}

// -----------------------------------------------------------------------------
// Comparison

impl PartialEq for Current<'_> {
    /// Scalars and strings compare by value, containers by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Array(a), Self::Array(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq<str> for Current<'_> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Current<'_> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

// -----------------------------------------------------------------------------
// Display

impl fmt::Display for Current<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Number(value) => number::write_js(value, f),
            Self::String(value) => f.write_str(value),
            Self::Object(object) => fmt::Display::fmt(object, f),
            Self::Array(array) => fmt::Display::fmt(array, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Path traversal

/// Returns the property name an accessor addresses on an object.
pub(crate) fn property_key<'a>(accessor: &'a Accessor<'_>) -> Cow<'a, str> {
    match accessor {
        Accessor::Key(key) => Cow::Borrowed(&**key),
        Accessor::Index(index) => Cow::Owned(index.to_string()),
    }
}

impl Traverse for Current<'_> {
    fn step(self, accessor: &Accessor<'_>) -> Result<Self, AccessErrorKind> {
        match self {
            Self::Object(object) => object
                .entry(&property_key(accessor))
                .map(|entry| entry.current(object.root()))
                .ok_or(AccessErrorKind::MissingField("object")),
            Self::Array(array) => {
                if accessor.as_key() == Some("length") {
                    return Ok(Current::from(array.len()));
                }
                accessor
                    .as_index()
                    .and_then(|index| array.entry(index))
                    .map(|entry| entry.current(array.root()))
                    .ok_or(AccessErrorKind::MissingField("array"))
            }
            Self::String(text) => match accessor.as_key() {
                Some("length") => Ok(Current::from(text.encode_utf16().count())),
                _ => Err(AccessErrorKind::MissingField("string")),
            },
            other => Err(AccessErrorKind::IncompatibleKind(other.kind_name())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::{Number, json};

    use super::Current;
    use crate::{Options, wrap};

    #[test]
    fn js_display() {
        assert_eq!(Current::Undefined.to_string(), "undefined");
        assert_eq!(Current::Null.to_string(), "null");
        assert_eq!(Current::Bool(true).to_string(), "true");
        assert_eq!(Current::from(7_usize).to_string(), "7");
        assert_eq!(Current::Number(Number::from_f64(2.0).unwrap()).to_string(), "2");
        assert_eq!(Current::Number(Number::from_f64(0.5).unwrap()).to_string(), "0.5");
        assert_eq!(Current::Number(Number::from(-3)).to_string(), "-3");

        let root = wrap(
            &json!({ "obj": { "k": 1 }, "arr": [1, null, "x", [2, 3]] }),
            Options::default(),
        );
        assert_eq!(root.get("obj").to_string(), "[object Object]");
        assert_eq!(root.get("arr").to_string(), "1,,x,2,3");
    }

    #[test]
    fn render_skips_missing_values() {
        let mut out = String::new();
        Current::Undefined.render_into(&mut out);
        Current::Null.render_into(&mut out);
        Current::Bool(false).render_into(&mut out);
        Current::from(String::from("!")).render_into(&mut out);
        assert_eq!(out, "false!");
    }

    #[test]
    fn comparison() {
        let root = wrap(&json!({ "a": {}, "b": {}, "s": "text" }), Options::default());

        assert_eq!(root.get("a"), root.get("a"));
        assert_ne!(root.get("a"), root.get("b"));
        assert_eq!(root.get("s"), "text");
        assert_ne!(root.get("s"), Current::Undefined);
        assert_eq!(Current::from(1_usize), Current::from(1_usize));
    }

    #[test]
    fn accessors() {
        let root = wrap(&json!({ "n": -4, "f": 1.5, "b": true, "list": [] }), Options::default());

        assert_eq!(root.get("n").as_i64(), Some(-4));
        assert_eq!(root.get("n").as_u64(), None);
        assert_eq!(root.get("f").as_f64(), Some(1.5));
        assert_eq!(root.get("b").as_bool(), Some(true));
        assert!(root.get("list").as_array().is_some_and(|list| list.is_empty()));
        assert!(root.get("list").as_object().is_none());
        assert_eq!(root.get("none").kind_name(), "undefined");
        assert_eq!(root.current().kind_name(), "object");
    }
}
