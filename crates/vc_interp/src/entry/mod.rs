//! The typed nodes of a live tree.
//!
//! Every raw value is turned into exactly one [`Entry`] by [`Entry::create`].
//! A write never mutates an entry's kind in place: the slot receives a new
//! entry built from the new raw value instead.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod fields;
mod object;
mod source;
mod string;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use array::ArrayEntry;
pub use object::ObjectEntry;
pub use source::Source;
pub use string::StringEntry;
pub use value::{Scalar, ValueEntry};

pub(crate) use fields::Fields;

use alloc::rc::Rc;
use core::fmt;

use serde_json::Value;

use crate::{Current, Options, RootEntry};

// -----------------------------------------------------------------------------
// EntryKind

/// The kind tag of an entry, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Root,
    Object,
    Array,
    Value,
    String,
}

impl EntryKind {
    /// Returns the lowercase name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Object => "object",
            Self::Array => "array",
            Self::Value => "value",
            Self::String => "string",
        }
    }
}

impl fmt::Display for EntryKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Entry

/// A child node of the tree.
///
/// The root is not an `Entry`: it is the [`RootEntry`] owning the tree.
#[derive(Debug)]
pub enum Entry {
    Object(ObjectEntry),
    Array(ArrayEntry),
    Value(ValueEntry),
    String(StringEntry),
}

impl Entry {
    /// Builds the entry for `raw`.
    ///
    /// - strings become [`StringEntry`]s;
    /// - `null`, booleans and numbers become [`ValueEntry`]s;
    /// - arrays and objects become [`ArrayEntry`]s when the options' array
    ///   predicate accepts them, [`ObjectEntry`]s otherwise.
    ///
    /// Containers recurse into their members. A container copies `raw` once
    /// and every nested container shares that copy through its [`Source`].
    pub fn create(options: &Rc<Options>, raw: &Value) -> Self {
        match raw {
            Value::Array(_) | Value::Object(_) => Self::container(options, Source::new(raw)),
            leaf => Self::leaf(options, leaf),
        }
    }

    /// Builds the entry for the subtree `source` points at.
    pub(crate) fn from_source(options: &Rc<Options>, source: Source) -> Self {
        let raw = source.get();
        if !(raw.is_array() || raw.is_object()) {
            return Self::leaf(options, raw);
        }
        Self::container(options, source)
    }

    fn container(options: &Rc<Options>, source: Source) -> Self {
        if options.is_array(source.get()) {
            Self::Array(ArrayEntry::new(options, source))
        } else {
            Self::Object(ObjectEntry::new(options, source))
        }
    }

    fn leaf(options: &Rc<Options>, raw: &Value) -> Self {
        match raw {
            Value::String(text) => Self::String(StringEntry::new(text, options)),
            Value::Bool(value) => Self::Value(ValueEntry::new(Scalar::Bool(*value))),
            Value::Number(value) => Self::Value(ValueEntry::new(Scalar::Number(value.clone()))),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                Self::Value(ValueEntry::new(Scalar::Null))
            }
        }
    }

    /// Returns a value entry holding `undefined`.
    #[inline]
    pub const fn undefined() -> Self {
        Self::Value(ValueEntry::new(Scalar::Undefined))
    }

    #[inline]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Object(_) => EntryKind::Object,
            Self::Array(_) => EntryKind::Array,
            Self::Value(_) => EntryKind::Value,
            Self::String(_) => EntryKind::String,
        }
    }

    /// Computes the current value of this entry against `root`.
    ///
    /// Strings are evaluated on every call.
    pub fn current<'r>(&'r self, root: &'r RootEntry) -> Current<'r> {
        match self {
            Self::Object(object) => Current::Object(object.view(root)),
            Self::Array(array) => Current::Array(array.view(root)),
            Self::Value(value) => Current::from(value.source()),
            Self::String(string) => Current::String(string.current(root)),
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectEntry> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectEntry> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayEntry> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut ArrayEntry> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    pub fn as_value(&self) -> Option<&ValueEntry> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_string(&self) -> Option<&StringEntry> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
