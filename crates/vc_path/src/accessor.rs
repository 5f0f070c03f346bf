//! Provide single-layer path accessing support

use alloc::borrow::Cow;
use core::fmt;

use crate::Traverse;

// -----------------------------------------------------------------------------
// Single layer accessor

/// A **singular** element access within a path.
///
/// A fundamental component of path access. Whether a given accessor applies
/// to a node is decided by the node's [`Traverse`] implementation, so a
/// `Key` may still address an array (`list.length`, `list.0`) and an `Index`
/// may still address an object whose key is spelled as a number.
///
/// # Examples
///
/// ```
/// use vc_path::Accessor;
///
/// let key = Accessor::Key("name".into());
/// let index = Accessor::Index(2);
///
/// assert_eq!(key.to_string(), ".name");
/// assert_eq!(index.to_string(), "[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Accessor<'a> {
    /// A name-based access.
    ///
    /// Example: the `id` of `.id`, or the `a.b` of `["a.b"]`
    Key(Cow<'a, str>),
    /// An index-based access.
    ///
    /// Example: the `5` of `[5]`
    Index(usize),
}

// -----------------------------------------------------------------------------
// Error

/// The kind of [`AccessError`], along with the kind name of the node
/// that could not be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    /// The node can be traversed with this accessor, but has nothing there.
    MissingField(&'static str),
    /// The node cannot be traversed with this accessor at all.
    IncompatibleKind(&'static str),
}

/// An error originating from an [`Accessor`] of an element within a tree.
///
/// Use the `Display` impl of this type to get information on the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError<'a> {
    kind: AccessErrorKind,
    accessor: Accessor<'a>,
    offset: Option<usize>,
}

impl fmt::Display for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(key) => write!(f, ".{key}"),
            Accessor::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Index keys

/// Returns `true` if `key` is an index written in canonical decimal form.
///
/// That is `"0"` or a run of ASCII digits without a leading zero. `"01"`,
/// `"+1"` and `""` are plain keys.
#[inline]
pub fn is_index_key(key: &str) -> bool {
    match key.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    }
}

/// Parses `key` as an index if [`is_index_key`] accepts it and it fits a `usize`.
#[inline]
pub fn parse_index(key: &str) -> Option<usize> {
    if is_index_key(key) { key.parse().ok() } else { None }
}

// -----------------------------------------------------------------------------
// Accessor implementation

impl<'a> Accessor<'a> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Accessor<'static> {
        match self {
            Self::Key(value) => Accessor::Key(Cow::Owned(value.into_owned())),
            Self::Index(value) => Accessor::Index(value),
        }
    }

    /// Returns the key spelled by this accessor, if it is a `Key`.
    #[inline]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the index of this accessor.
    ///
    /// A `Key` spelling an index in canonical form counts as an index too,
    /// so `list.1` and `list[1]` address the same element. See [`parse_index`].
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Key(key) => parse_index(key),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Key(_) => "Key",
            Self::Index(_) => "Index",
        }
    }

    /// Traverses one level down from `base`.
    pub fn access<T: Traverse>(
        &self,
        base: T,
        offset: Option<usize>, // use for error info
    ) -> Result<T, AccessError<'a>> {
        base.step(self).map_err(|kind| AccessError {
            kind,
            accessor: self.clone(),
            offset,
        })
    }
}

// -----------------------------------------------------------------------------
// Error implementation

impl<'a> AccessError<'a> {
    /// Returns the kind of [`AccessError`].
    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Returns the [`Accessor`] that this [`AccessError`] occurred in.
    #[inline]
    pub fn accessor(&self) -> &Accessor<'_> {
        &self.accessor
    }

    /// If the [`Accessor`] was created with a parser or an offset was manually provided,
    /// returns the offset of the [`Accessor`] in its path string.
    #[inline]
    pub fn offset(&self) -> Option<&usize> {
        self.offset.as_ref()
    }

    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> AccessError<'static> {
        AccessError {
            kind: self.kind,
            accessor: self.accessor.into_owned(),
            offset: self.offset,
        }
    }
}

impl fmt::Display for AccessError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let AccessError {
            kind,
            accessor,
            offset,
        } = self;

        write!(f, "Error accessing element with `{accessor}` accessor")?;
        if let Some(offset) = offset {
            write!(f, "(offset {offset})")?;
        }
        write!(f, ": ")?;

        match kind {
            AccessErrorKind::MissingField(accessed) => match accessor {
                Accessor::Key(key) => write!(f, "The {accessed} accessed doesn't have key `{key}`"),
                Accessor::Index(index) => {
                    write!(f, "The {accessed} accessed doesn't have index `{index}`")
                }
            },
            AccessErrorKind::IncompatibleKind(actual) => write!(
                f,
                "{} accessor cannot traverse a {actual}.",
                accessor.kind()
            ),
        }
    }
}

impl core::error::Error for AccessError<'_> {}

// -----------------------------------------------------------------------------
// Single layer accessor with offset

/// An [`Accessor`] combined with an `offset` for more helpful error reporting.
///
/// `offset` is only used to display error messages, unrelated to access.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetAccessor<'a> {
    pub accessor: Accessor<'a>,
    /// only used to display error messages
    pub offset: Option<usize>,
}

impl<'a> From<Accessor<'a>> for OffsetAccessor<'a> {
    #[inline]
    fn from(accessor: Accessor<'a>) -> Self {
        Self {
            accessor,
            offset: None,
        }
    }
}

impl<'a> OffsetAccessor<'a> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> OffsetAccessor<'static> {
        OffsetAccessor {
            accessor: self.accessor.into_owned(),
            offset: self.offset,
        }
    }

    /// Traverses one level down from `base`.
    #[inline]
    pub fn access<T: Traverse>(&self, base: T) -> Result<T, AccessError<'a>> {
        self.accessor.access(base, self.offset)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{AccessError, AccessErrorKind, Accessor, is_index_key, parse_index};

    #[test]
    fn numeric_keys_count_as_indices() {
        assert_eq!(Accessor::Key("12".into()).as_index(), Some(12));
        assert_eq!(Accessor::Key("0".into()).as_index(), Some(0));
        assert_eq!(Accessor::Key("1a".into()).as_index(), None);
        assert_eq!(Accessor::Key("".into()).as_index(), None);
        assert_eq!(Accessor::Index(3).as_index(), Some(3));
    }

    #[test]
    fn leading_zeros_and_signs_are_plain_keys() {
        for key in ["01", "00", "+1", "-1", " 1"] {
            assert!(!is_index_key(key), "{key}");
            assert_eq!(Accessor::Key(key.into()).as_index(), None, "{key}");
        }
        assert_eq!(parse_index("99999999999999999999999"), None);
        assert_eq!(parse_index("10"), Some(10));
    }

    #[test]
    fn error_message() {
        let err = AccessError {
            kind: AccessErrorKind::MissingField("object"),
            accessor: Accessor::Key("port".into()),
            offset: Some(7),
        };
        assert_eq!(
            err.to_string(),
            "Error accessing element with `.port` accessor(offset 7): \
             The object accessed doesn't have key `port`"
        );

        let err = AccessError {
            kind: AccessErrorKind::IncompatibleKind("value"),
            accessor: Accessor::Index(0),
            offset: None,
        };
        assert_eq!(
            err.to_string(),
            "Error accessing element with `[0]` accessor: Index accessor cannot traverse a value."
        );
    }
}
