use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use serde_json::Value;

static MISSING: Value = Value::Null;

// -----------------------------------------------------------------------------
// Source

/// A shared handle to the raw subtree a container entry was built from.
///
/// Every container built from one raw value shares that value's storage:
/// each keeps a clone of the same `Rc` plus the JSON pointer of its own
/// subtree, so wrapping copies the input once regardless of depth.
#[derive(Clone)]
pub struct Source {
    document: Rc<Value>,
    pointer: String,
}

impl Source {
    /// Takes a single copy of `raw` and points at its top.
    pub(crate) fn new(raw: &Value) -> Self {
        Self {
            document: Rc::new(raw.clone()),
            pointer: String::new(),
        }
    }

    /// Returns a handle to the member `segment` of this subtree.
    ///
    /// `~` and `/` in the segment are escaped as RFC 6901 requires.
    pub(crate) fn child(&self, segment: &str) -> Self {
        let mut pointer = String::with_capacity(self.pointer.len() + segment.len() + 1);
        pointer.push_str(&self.pointer);
        pointer.push('/');
        for ch in segment.chars() {
            match ch {
                '~' => pointer.push_str("~0"),
                '/' => pointer.push_str("~1"),
                ch => pointer.push(ch),
            }
        }
        Self {
            document: Rc::clone(&self.document),
            pointer,
        }
    }

    /// Returns the subtree this handle points at.
    #[inline]
    pub fn get(&self) -> &Value {
        self.document.pointer(&self.pointer).unwrap_or(&MISSING)
    }

    /// Returns the JSON pointer of the subtree inside [`document`](Self::document).
    #[inline]
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// Returns the whole raw value this subtree belongs to.
    #[inline]
    pub fn document(&self) -> &Rc<Value> {
        &self.document
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use serde_json::json;

    use super::Source;

    #[test]
    fn children_share_the_document() {
        let source = Source::new(&json!({ "a/b": { "~k": [10, 20] } }));
        let list = source.child("a/b").child("~k");
        let second = list.child("1");

        assert_eq!(list.pointer(), "/a~1b/~0k");
        assert!(Rc::ptr_eq(list.document(), source.document()));
        assert!(core::ptr::eq(list.get(), &source.get()["a/b"]["~k"]));
        assert_eq!(second.get(), &json!(20));
        assert!(source.child("missing").get().is_null());
    }
}
