use alloc::boxed::Box;
use alloc::string::String;
use core::cell::Cell;

use crate::{Options, RootEntry, Template};

// -----------------------------------------------------------------------------
// StringEntry

/// A leaf entry holding a template string.
///
/// The template is parsed once, at construction, and evaluated again at
/// every read. A string that reaches itself again while being evaluated
/// contributes an empty string at the point of re-entry.
#[derive(Debug)]
pub struct StringEntry {
    source: Box<str>,
    template: Template,
    evaluating: Cell<bool>,
}

struct EvaluationGuard<'a>(&'a Cell<bool>);

impl Drop for EvaluationGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl StringEntry {
    pub(crate) fn new(source: &str, options: &Options) -> Self {
        Self {
            source: source.into(),
            template: Template::parse(source, options),
            evaluating: Cell::new(false),
        }
    }

    /// Returns the raw template text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Evaluates the template against `root`.
    pub fn current(&self, root: &RootEntry) -> String {
        if self.template.is_literal() {
            return String::from(&*self.source);
        }
        if self.evaluating.replace(true) {
            log::warn!(
                "placeholder cycle through `{}`, substituting an empty string",
                self.source
            );
            return String::new();
        }
        let _guard = EvaluationGuard(&self.evaluating);
        self.template.render(root)
    }
}

// -----------------------------------------------------------------------------
// Tests
