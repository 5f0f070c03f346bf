use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::{fmt, mem};

use serde_json::Value;

use crate::entry::Source;
use crate::{ArrayRef, Entry, Error, Options, RootEntry};

// -----------------------------------------------------------------------------
// ArrayEntry

/// A container entry mirroring an ordered source.
///
/// Position `i` always reads slot `i` of the sequence: inserting at the
/// front moves the existing children to higher positions rather than
/// renumbering anything.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_interp::{Options, wrap};
///
/// let mut root = wrap(&json!({ "xs": ["b"] }), Options::default());
/// let xs = root.entry_mut("xs").and_then(|e| e.as_array_mut()).unwrap();
///
/// assert_eq!(xs.push([&json!("c")]), 2);
/// assert_eq!(xs.unshift([&json!("a")]), 3);
///
/// assert_eq!(root.get_path("xs").to_string(), "a,b,c");
/// ```
pub struct ArrayEntry {
    options: Rc<Options>,
    source: Source,
    items: Vec<Entry>,
}

impl ArrayEntry {
    pub(crate) fn new(options: &Rc<Options>, source: Source) -> Self {
        let children: Vec<Source> = match source.get() {
            Value::Array(items) => (0..items.len())
                .map(|index| source.child(&index.to_string()))
                .collect(),
            Value::Object(map) => map.keys().map(|key| source.child(key)).collect(),
            _ => Vec::new(),
        };

        let items = children
            .into_iter()
            .map(|child| Entry::from_source(options, child))
            .collect();

        Self {
            options: Rc::clone(options),
            source,
            items,
        }
    }

    /// Returns the raw value this entry was created from.
    #[inline]
    pub fn source(&self) -> &Value {
        self.source.get()
    }

    /// Returns the shared handle behind [`source`](Self::source).
    #[inline]
    pub fn shared_source(&self) -> &Source {
        &self.source
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Entry> {
        self.items.iter()
    }

    /// Appends an entry for each raw value and returns the new length.
    pub fn push<'v>(&mut self, values: impl IntoIterator<Item = &'v Value>) -> usize {
        for raw in values {
            let entry = Entry::create(&self.options, raw);
            self.items.push(entry);
        }
        self.items.len()
    }

    /// Inserts an entry for each raw value ahead of the existing ones,
    /// keeping the argument order, and returns the new length.
    pub fn unshift<'v>(&mut self, values: impl IntoIterator<Item = &'v Value>) -> usize {
        let tail = mem::take(&mut self.items);
        self.push(values);
        self.items.extend(tail);
        self.items.len()
    }

    /// Sets the length.
    ///
    /// Shrinking drops the trailing children; growing appends `undefined`
    /// value entries.
    pub fn set_len(&mut self, len: usize) {
        if len == self.items.len() {
            return;
        }
        log::trace!("resizing array entry from {} to {len}", self.items.len());
        self.items.resize_with(len, Entry::undefined);
    }

    /// Replaces the child at `index` with a new entry built from `raw`,
    /// returning the replaced entry.
    ///
    /// Only existing positions can be written; use [`push`](Self::push) or
    /// [`set_len`](Self::set_len) to grow the array.
    pub fn set(&mut self, index: usize, raw: &Value) -> Result<Entry, Error> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let entry = Entry::create(&self.options, raw);
        Ok(mem::replace(&mut self.items[index], entry))
    }

    /// Pairs this entry with `root` for reading.
    #[inline]
    pub fn view<'r>(&'r self, root: &'r RootEntry) -> ArrayRef<'r> {
        ArrayRef::new(self, root)
    }
}

impl fmt::Debug for ArrayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use serde_json::json;

    use super::ArrayEntry;
    use crate::entry::Source;
    use crate::{EntryKind, Error, Options, Scalar};

    fn strings(array: &ArrayEntry) -> Vec<&str> {
        array
            .iter()
            .map(|entry| entry.as_string().map_or("?", |s| s.source()))
            .collect()
    }

    #[test]
    fn resize() {
        let options = Rc::new(Options::default());
        let mut array = ArrayEntry::new(&options, Source::new(&json!(["a", "b", "c"])));

        array.set_len(1);
        assert_eq!(strings(&array), ["a"]);

        array.set_len(3);
        assert_eq!(array.len(), 3);
        let grown = array.get(2).and_then(|e| e.as_value()).unwrap();
        assert_eq!(grown.source(), &Scalar::Undefined);

        array.set_len(3);
        assert_eq!(array.len(), 3);

        array.set_len(0);
        assert!(array.is_empty());
    }

    #[test]
    fn push_and_unshift_order() {
        let options = Rc::new(Options::default());
        let mut array = ArrayEntry::new(&options, Source::new(&json!(["c"])));

        assert_eq!(array.push([&json!("d"), &json!("e")]), 3);
        assert_eq!(array.unshift([&json!("a"), &json!("b")]), 5);
        assert_eq!(strings(&array), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn positions_read_their_slot_after_unshift() {
        let options = Rc::new(Options::default());
        let mut array = ArrayEntry::new(&options, Source::new(&json!(["old0", "old1"])));

        array.unshift([&json!("new")]);

        // Every position, including the one added at the end, reads the
        // slot at that position of the new sequence.
        for (index, expected) in ["new", "old0", "old1"].into_iter().enumerate() {
            let entry = array.get(index).and_then(|e| e.as_string()).unwrap();
            assert_eq!(entry.source(), expected);
        }
        assert!(array.get(3).is_none());
    }

    #[test]
    fn set_replaces_existing_positions_only() {
        let options = Rc::new(Options::default());
        let mut array = ArrayEntry::new(&options, Source::new(&json!([1, 2])));

        let old = array.set(1, &json!({ "k": "v" })).unwrap();
        assert_eq!(old.kind(), EntryKind::Value);
        assert_eq!(array.get(1).map(|e| e.kind()), Some(EntryKind::Object));

        assert!(matches!(
            array.set(2, &json!(3)),
            Err(Error::IndexOutOfBounds { index: 2, len: 2 })
        ));
        assert!(array.get_mut(0).is_some());
    }

    #[test]
    fn object_source_contributes_values() {
        let options = Rc::new(Options::default().with_array_predicate(|_| true));
        let source = Source::new(&json!({ "first": "x", "second": "y" }));
        let array = ArrayEntry::new(&options, source);
        assert_eq!(strings(&array), ["x", "y"]);
        assert!(array.source().is_object());
    }

    #[test]
    fn elements_share_the_array_source() {
        let options = Rc::new(Options::default());
        let source = Source::new(&json!([{ "k": 1 }, [[true]]]));
        let array = ArrayEntry::new(&options, source);

        let first = array.get(0).and_then(|e| e.as_object()).unwrap();
        let inner = array
            .get(1)
            .and_then(|e| e.as_array())
            .and_then(|e| e.get(0))
            .and_then(|e| e.as_array())
            .unwrap();

        assert!(core::ptr::eq(first.source(), &array.source()[0]));
        assert!(core::ptr::eq(inner.source(), &array.source()[1][0]));
        assert_eq!(inner.shared_source().pointer(), "/1/0");
        assert_eq!(Rc::strong_count(array.shared_source().document()), 4);
    }
}
