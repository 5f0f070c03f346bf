use serde_json::{Number, Value};

// -----------------------------------------------------------------------------
// Scalar

/// The source of a [`ValueEntry`].
///
/// `Undefined` has no JSON counterpart: it fills array slots created by
/// growing the length, and accessors defined before their first assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Scalar {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
}

impl Scalar {
    /// Returns the JSON form of the scalar, `None` for `Undefined`.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Undefined => None,
            Self::Null => Some(Value::Null),
            Self::Bool(value) => Some(Value::Bool(*value)),
            Self::Number(value) => Some(Value::Number(value.clone())),
        }
    }
}

// -----------------------------------------------------------------------------
// ValueEntry

/// A leaf entry holding a non-string scalar.
///
/// Its current value is always its source.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEntry {
    source: Scalar,
}

impl ValueEntry {
    #[inline]
    pub const fn new(source: Scalar) -> Self {
        Self { source }
    }

    #[inline]
    pub fn source(&self) -> &Scalar {
        &self.source
    }
}
