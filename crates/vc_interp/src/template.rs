//! Parsing and evaluation of `${...}` templates.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::resolve::Resolve;
use crate::{Options, RootEntry};

// -----------------------------------------------------------------------------
// Segment

/// One unit of a parsed template.
pub enum Segment {
    /// Fixed text, copied to the output as is.
    Literal(Box<str>),
    /// A placeholder, resolved against the root at every render.
    Placeholder {
        key: Box<str>,
        resolver: Box<dyn Resolve>,
    },
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Placeholder { key, .. } => f.debug_tuple("Placeholder").field(key).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// Template

/// A string split into literal and placeholder [`Segment`]s.
///
/// Parsing happens once; [`render`](Template::render) evaluates every
/// placeholder again on each call and never caches the result.
///
/// There is no escape for a literal `${`: anything the placeholder pattern
/// matches is treated as a placeholder.
#[derive(Debug, Default)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Splits `source` on the placeholder pattern of `options`.
    ///
    /// Every placeholder key is compiled through the options' resolver factory.
    pub fn parse(source: &str, options: &Options) -> Self {
        let mut segments = Vec::new();
        let mut index = 0;

        for captures in options.pattern().captures_iter(source) {
            let Some(found) = captures.get(0) else {
                continue;
            };

            if found.start() != index {
                segments.push(Segment::Literal(source[index..found.start()].into()));
            }

            // A named `key` group wins, then the innermost participating group.
            let key = captures
                .name("key")
                .or_else(|| captures.iter().skip(1).flatten().last())
                .map(|m| m.as_str())
                .filter(|key| !key.is_empty());

            if let Some(key) = key {
                segments.push(Segment::Placeholder {
                    key: key.into(),
                    resolver: options.compile(key),
                });
            }

            index = found.end();
        }

        if index != source.len() {
            segments.push(Segment::Literal(source[index..].into()));
        }

        Self { segments }
    }

    /// Returns the segments in source order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if the template holds no placeholder.
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Literal(_)))
    }

    /// Returns the keys of all placeholders, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { key, .. } => Some(&**key),
            Segment::Literal(_) => None,
        })
    }

    /// Evaluates every segment against `root` and concatenates the results.
    ///
    /// An undefined or null placeholder contributes nothing.
    pub fn render(&self, root: &RootEntry) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { resolver, .. } => resolver.resolve(root).render_into(&mut out),
            }
        }
        out
    }
}

// -----------------------------------------------------------------------------
// Tests
