//! The default [`AccessPath`] implementation for `&str`.

use alloc::borrow::Cow;
use alloc::string::String;

use crate::{AccessPath, Accessor, OffsetAccessor, ParseError, is_index_key};

// -----------------------------------------------------------------------------
// Parser

/// An iterator over the accessors of a path string.
///
/// Stops after the first [`ParseError`].
///
/// # Examples
///
/// ```
/// use vc_path::{Accessor, PathParser};
///
/// let accessors: Vec<_> = PathParser::new("hosts[1].name")
///     .map(|res| res.unwrap().accessor)
///     .collect();
///
/// assert_eq!(
///     accessors,
///     [
///         Accessor::Key("hosts".into()),
///         Accessor::Index(1),
///         Accessor::Key("name".into()),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PathParser<'a> {
    path: &'a str,
    offset: usize,
    failed: bool,
}

impl<'a> PathParser<'a> {
    /// Creates a parser over `path`.
    #[inline]
    pub const fn new(path: &'a str) -> Self {
        Self {
            path,
            offset: 0,
            failed: false,
        }
    }

    #[cold]
    fn error(&mut self, offset: usize, message: &'static str) -> ParseError<'a> {
        self.failed = true;
        ParseError::new(self.path, offset, message)
    }

    /// Returns the end of a bare key starting at `start`.
    fn key_end(&self, start: usize) -> usize {
        match self.path[start..].find(['.', '[', ']']) {
            Some(len) => start + len,
            None => self.path.len(),
        }
    }

    fn bare_key(
        &mut self,
        start: usize,
        key_start: usize,
    ) -> Result<OffsetAccessor<'a>, ParseError<'a>> {
        let path = self.path;
        let end = self.key_end(key_start);
        if end == key_start {
            return Err(self.error(key_start, "expected a key after `.`"));
        }
        self.offset = end;
        Ok(OffsetAccessor {
            accessor: Accessor::Key(Cow::Borrowed(&path[key_start..end])),
            offset: Some(start),
        })
    }

    fn bracket(&mut self, start: usize) -> Result<OffsetAccessor<'a>, ParseError<'a>> {
        let path = self.path;
        let bytes = path.as_bytes();
        let inner = start + 1;

        let accessor = match bytes.get(inner) {
            None => return Err(self.error(start, "unclosed `[`")),
            Some(&quote @ (b'"' | b'\'')) => {
                let content_start = inner + 1;
                let mut owned: Option<String> = None;
                let mut chunk_start = content_start;
                let mut at = content_start;

                loop {
                    match bytes.get(at) {
                        None => return Err(self.error(inner, "unterminated quoted key")),
                        Some(b'\\') => {
                            let Some(escaped) = path[at + 1..].chars().next() else {
                                return Err(self.error(at, "dangling `\\` in quoted key"));
                            };
                            let buf = owned.get_or_insert_with(String::new);
                            buf.push_str(&path[chunk_start..at]);
                            buf.push(escaped);
                            at += 1 + escaped.len_utf8();
                            chunk_start = at;
                        }
                        Some(&byte) if byte == quote => break,
                        Some(_) => at += 1,
                    }
                }

                if bytes.get(at + 1) != Some(&b']') {
                    return Err(self.error(at + 1, "expected `]` after quoted key"));
                }
                self.offset = at + 2;

                match owned {
                    Some(mut buf) => {
                        buf.push_str(&path[chunk_start..at]);
                        Accessor::Key(Cow::Owned(buf))
                    }
                    None => Accessor::Key(Cow::Borrowed(&path[content_start..at])),
                }
            }
            Some(_) => {
                let Some(len) = path[inner..].find(']') else {
                    return Err(self.error(start, "unclosed `[`"));
                };
                let content = &path[inner..inner + len];
                if content.is_empty() {
                    return Err(self.error(inner, "empty `[]`"));
                }
                self.offset = inner + len + 1;

                if is_index_key(content) {
                    match content.parse() {
                        Ok(index) => Accessor::Index(index),
                        Err(_) => return Err(self.error(inner, "index is too large")),
                    }
                } else {
                    Accessor::Key(Cow::Borrowed(content))
                }
            }
        };

        Ok(OffsetAccessor {
            accessor,
            offset: Some(start),
        })
    }

    fn next_accessor(&mut self) -> Result<OffsetAccessor<'a>, ParseError<'a>> {
        let start = self.offset;
        match self.path.as_bytes()[start] {
            b'.' => self.bare_key(start, start + 1),
            b'[' => self.bracket(start),
            b']' => Err(self.error(start, "unmatched `]`")),
            _ if start == 0 => self.bare_key(start, start),
            _ => Err(self.error(start, "expected `.` or `[`")),
        }
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<OffsetAccessor<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.path.len() {
            return None;
        }
        Some(self.next_accessor())
    }
}

impl<'a> AccessPath<'a> for &'a str {
    #[inline]
    fn parse_to_accessor(
        &self,
    ) -> impl Iterator<Item = Result<OffsetAccessor<'a>, ParseError<'a>>> {
        PathParser::new(*self)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    use super::PathParser;
    use crate::{Accessor, ParseError};

    fn parse(path: &str) -> Result<Vec<Accessor<'_>>, ParseError<'_>> {
        PathParser::new(path)
            .map(|res| res.map(|it| it.accessor))
            .collect()
    }

    fn key(key: &str) -> Accessor<'_> {
        Accessor::Key(Cow::Borrowed(key))
    }

    #[test]
    fn dotted_and_bracketed() {
        assert_eq!(parse("a").unwrap(), [key("a")]);
        assert_eq!(parse("a.b").unwrap(), [key("a"), key("b")]);
        assert_eq!(parse(".a.b").unwrap(), [key("a"), key("b")]);
        assert_eq!(
            parse("a[0].b").unwrap(),
            [key("a"), Accessor::Index(0), key("b")]
        );
        assert_eq!(parse("[2][3]").unwrap(), [Accessor::Index(2), Accessor::Index(3)]);
        assert_eq!(parse("a.0").unwrap(), [key("a"), key("0")]);
        assert_eq!(parse("a[b]").unwrap(), [key("a"), key("b")]);
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn bracketed_leading_zero_is_a_key() {
        assert_eq!(parse("xs[01]").unwrap(), [key("xs"), key("01")]);
        assert_eq!(parse("xs[0]").unwrap(), [key("xs"), Accessor::Index(0)]);
        assert_eq!(parse("xs[+1]").unwrap(), [key("xs"), key("+1")]);
    }

    #[test]
    fn quoted_keys() {
        assert_eq!(parse(r#"a["b.c"]"#).unwrap(), [key("a"), key("b.c")]);
        assert_eq!(parse("['x y']").unwrap(), [key("x y")]);
        assert_eq!(parse(r#"["say \"hi\""]"#).unwrap(), [key(r#"say "hi""#)]);
        assert_eq!(parse(r#"["a\]b"]"#).unwrap(), [key("a]b")]);
        assert_eq!(parse("['ключ']").unwrap(), [key("ключ")]);
    }

    #[test]
    fn offsets() {
        let offsets: Vec<_> = PathParser::new("ab[1].c")
            .map(|res| res.unwrap().offset)
            .collect();
        assert_eq!(offsets, [Some(0), Some(2), Some(5)]);
    }

    #[test]
    fn errors() {
        let err = parse("a..b").unwrap_err();
        assert_eq!(err.offset(), 2);
        assert_eq!(err.message(), "expected a key after `.`");
        assert_eq!(err.to_string(), "expected a key after `.` at byte 2 of `a..b`");

        assert_eq!(parse("a.").unwrap_err().offset(), 2);
        assert_eq!(parse("a[").unwrap_err().message(), "unclosed `[`");
        assert_eq!(parse("a[0").unwrap_err().message(), "unclosed `[`");
        assert_eq!(parse("a[]").unwrap_err().message(), "empty `[]`");
        assert_eq!(parse("a]").unwrap_err().message(), "unmatched `]`");
        assert_eq!(parse("a[0]b").unwrap_err().message(), "expected `.` or `[`");
        assert_eq!(parse(r#"a["b"#).unwrap_err().message(), "unterminated quoted key");
        assert_eq!(parse(r#"a["b"x]"#).unwrap_err().message(), "expected `]` after quoted key");
        assert_eq!(
            parse("[99999999999999999999999999]").unwrap_err().message(),
            "index is too large"
        );
    }

    #[test]
    fn stops_after_first_error() {
        let mut parser = PathParser::new("a..b.c");
        assert!(parser.next().unwrap().is_ok());
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }
}
