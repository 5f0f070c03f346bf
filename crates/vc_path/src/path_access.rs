//! Provide multi-layer path accessing support

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{AccessError, AccessErrorKind, AccessPath, Accessor, OffsetAccessor, ParseError};

// -----------------------------------------------------------------------------
// Traverse

/// A node of a tree that can be walked by an [`Accessor`].
///
/// Implemented by handles (usually references) into the tree, so that a
/// walk consumes one handle and yields the next.
///
/// # Examples
///
/// ```
/// use vc_path::{AccessErrorKind, Accessor, PathAccessor, Traverse};
///
/// #[derive(Debug, PartialEq)]
/// enum Node<'a> {
///     Rows(&'a [u32]),
///     Cell(u32),
/// }
///
/// impl Traverse for Node<'_> {
///     fn step(self, accessor: &Accessor<'_>) -> Result<Self, AccessErrorKind> {
///         match self {
///             Node::Rows(rows) => accessor
///                 .as_index()
///                 .and_then(|index| rows.get(index))
///                 .map(|cell| Node::Cell(*cell))
///                 .ok_or(AccessErrorKind::MissingField("rows")),
///             Node::Cell(_) => Err(AccessErrorKind::IncompatibleKind("cell")),
///         }
///     }
/// }
///
/// let data = [7, 8, 9];
/// let accessor = PathAccessor::parse_static("[2]").unwrap();
/// assert_eq!(accessor.walk(Node::Rows(&data)).unwrap(), Node::Cell(9));
/// ```
pub trait Traverse: Sized {
    /// Moves one level down through `accessor`.
    fn step(self, accessor: &Accessor<'_>) -> Result<Self, AccessErrorKind>;
}

// -----------------------------------------------------------------------------
// Error

/// An error returned from a failed path access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathAccessError<'a> {
    /// A path string that could not be parsed.
    /// See [`ParseError`] for details.
    ParseError(ParseError<'a>),
    /// Access failed after parsing.
    /// See [`AccessError`] for details.
    AccessError(AccessError<'a>),
}

impl fmt::Display for PathAccessError<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(err) => fmt::Display::fmt(err, f),
            Self::AccessError(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for PathAccessError<'_> {}

impl<'a> From<ParseError<'a>> for PathAccessError<'a> {
    #[inline]
    fn from(value: ParseError<'a>) -> Self {
        Self::ParseError(value)
    }
}

impl<'a> From<AccessError<'a>> for PathAccessError<'a> {
    #[inline]
    fn from(value: AccessError<'a>) -> Self {
        Self::AccessError(value)
    }
}

// -----------------------------------------------------------------------------
// Reusable Multi-layer accessor

/// Reusable path accessor, a thin wrapper over `Box<[OffsetAccessor]>`.
///
/// [`OffsetAccessor`] and [`Accessor`] only allow access to a single level,
/// while this type allows for complete path queries.
///
/// Unlike [`walk_path`], this container parses the path string only once during
/// initialization. However, for non-static strings, it requires copying for storage.
///
/// # Examples
///
/// ```
/// use vc_path::PathAccessor;
///
/// let accessor = PathAccessor::parse_static("db.replicas[1]").unwrap();
/// assert_eq!(accessor.len(), 3);
/// assert_eq!(accessor.to_string(), ".db.replicas[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathAccessor(Box<[OffsetAccessor<'static>]>);

impl From<Box<[OffsetAccessor<'static>]>> for PathAccessor {
    #[inline]
    fn from(value: Box<[OffsetAccessor<'static>]>) -> Self {
        Self(value)
    }
}

impl PathAccessor {
    /// Parses the path string and creates a [`PathAccessor`].
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// This function will create a [`String`] for each key.
    /// For `&'static str` or `impl AccessPath<'static>`,
    /// consider using [`parse_static`] for better performance.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vc_path::PathAccessor;
    /// let s = String::from("field[2].name");
    /// let accessor = PathAccessor::parse(&s as &str).unwrap();
    /// assert_eq!(accessor.len(), 3);
    /// ```
    ///
    /// [`String`]: alloc::string::String
    /// [`parse_static`]: PathAccessor::parse_static
    pub fn parse<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError<'a>> {
        let mut data: Vec<OffsetAccessor<'static>> = Vec::new();

        for res in path.parse_to_accessor() {
            data.push(res?.into_owned());
        }

        Ok(Self(data.into_boxed_slice()))
    }

    /// Parses the path and creates a [`PathAccessor`].
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// For `&'static str` or `impl AccessPath<'static>`; stores string references without
    /// creating additional [`String`]s.
    ///
    /// [`String`]: alloc::string::String
    pub fn parse_static(path: impl AccessPath<'static>) -> Result<Self, ParseError<'static>> {
        let data = path
            .parse_to_accessor()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(data.into_boxed_slice()))
    }

    /// Returns the number of single-layer accessors.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path is empty and [`walk`](Self::walk) returns its input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits off the final accessor, see [`slice::split_last`].
    #[inline]
    pub fn split_last(&self) -> Option<(&OffsetAccessor<'static>, &[OffsetAccessor<'static>])> {
        self.0.split_last()
    }

    /// Walks the whole path down from `base`.
    ///
    /// The accessor itself will not change and can be reused.
    pub fn walk<T: Traverse>(&self, base: T) -> Result<T, PathAccessError<'static>> {
        let mut it = base;
        for accessor in &self.0 {
            it = accessor.access(it)?;
        }
        Ok(it)
    }
}

impl fmt::Display for PathAccessor {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for it in &self.0 {
            fmt::Display::fmt(&it.accessor, f)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Once multi-layer accessing

/// Parses `path` while walking it down from `base`.
///
/// Nothing is copied, even for non-static strings.
/// If a path needs to be reused, consider using [`PathAccessor`], which only needs to be parsed once.
pub fn walk_path<'p, T: Traverse>(
    base: T,
    path: impl AccessPath<'p>,
) -> Result<T, PathAccessError<'p>> {
    let mut it = base;
    for res in path.parse_to_accessor() {
        let accessor = res?;
        it = accessor.access(it)?;
    }
    Ok(it)
}

// -----------------------------------------------------------------------------
// Tests
