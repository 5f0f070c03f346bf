//! The path abstraction and its parse error.

use core::fmt;

use crate::OffsetAccessor;

// -----------------------------------------------------------------------------
// ParseError

/// A path string that could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError<'a> {
    path: &'a str,
    offset: usize,
    message: &'static str,
}

impl<'a> ParseError<'a> {
    #[inline]
    pub(crate) const fn new(path: &'a str, offset: usize, message: &'static str) -> Self {
        Self {
            path,
            offset,
            message,
        }
    }

    /// Returns the full path being parsed.
    #[inline]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// Returns the byte offset in [`path`](Self::path) where parsing stopped.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns what was expected or found at the offset.
    #[inline]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at byte {} of `{}`",
            self.message, self.offset, self.path
        )
    }
}

impl core::error::Error for ParseError<'_> {}

// -----------------------------------------------------------------------------
// AccessPath

/// Something that can be split into a sequence of [`OffsetAccessor`]s.
///
/// Implemented for `&str` with the grammar below; other syntaxes can be
/// plugged in by implementing this trait.
///
/// - Key: `name` or `.name`, running until the next `.` or `[`.
/// - Index: `[3]`.
/// - Quoted key: `["a.b"]` or `['a.b']`; `\` escapes the next character.
/// - Bare bracket key: `[name]`.
pub trait AccessPath<'a> {
    /// Yields the accessors of the path in order, stopping at the first error.
    fn parse_to_accessor(&self)
    -> impl Iterator<Item = Result<OffsetAccessor<'a>, ParseError<'a>>>;
}
