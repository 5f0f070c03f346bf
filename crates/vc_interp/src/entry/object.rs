use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use serde_json::Value;

use crate::entry::{Fields, Source};
use crate::{Entry, ObjectRef, Options, RootEntry};

/// Returns the member keys of a container source.
///
/// Arrays are keyed by their indices.
fn member_keys(source: &Value) -> Vec<String> {
    match source {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|index| index.to_string()).collect(),
        _ => Vec::new(),
    }
}

// -----------------------------------------------------------------------------
// ObjectEntry

/// A container entry mirroring a keyed source.
///
/// Only the keys accepted by the options' filter get an accessor. Writing a
/// key replaces its child through [`Entry::create`]; writing a key that has
/// no accessor yet defines one.
pub struct ObjectEntry {
    options: Rc<Options>,
    source: Source,
    fields: Fields,
}

impl ObjectEntry {
    pub(crate) fn new(options: &Rc<Options>, source: Source) -> Self {
        let members: Vec<(String, Source)> = {
            let raw = source.get();
            member_keys(raw)
                .into_iter()
                .filter(|key| options.filter(raw, key))
                .map(|key| {
                    let child = source.child(&key);
                    (key, child)
                })
                .collect()
        };

        let mut this = Self {
            options: Rc::clone(options),
            source,
            fields: Fields::default(),
        };

        // Every accessor exists before any child is built.
        for (key, _) in &members {
            this.fields.define(key, Entry::undefined());
        }
        for (key, child) in members {
            let entry = Entry::from_source(&this.options, child);
            this.fields.define(&key, entry);
        }

        this
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
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.len() == 0
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the keys in definition order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.keys()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Entry)> {
        self.fields.iter()
    }

    #[inline]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.fields.get(key)
    }

    #[inline]
    pub fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.fields.get_mut(key)
    }

    /// Replaces the child at `key` with a new entry built from `raw`.
    ///
    /// Returns the replaced entry, or `None` if the key was newly defined.
    pub fn set(&mut self, key: &str, raw: &Value) -> Option<Entry> {
        let entry = Entry::create(&self.options, raw);
        self.fields.define(key, entry)
    }

    /// Deletes the accessor of `key` along with its child.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.fields.remove(key)
    }

    /// Pairs this entry with `root` for reading.
    #[inline]
    pub fn view<'r>(&'r self, root: &'r RootEntry) -> ObjectRef<'r> {
        ObjectRef::new(self, root)
    }
}

impl fmt::Debug for ObjectEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use serde_json::json;

    use super::ObjectEntry;
    use crate::entry::Source;
    use crate::{EntryKind, Options};

    #[test]
    fn wraps_accepted_keys_in_order() {
        let options = Rc::new(Options::default().with_filter(|_, key| key != "skip"));
        let source = Source::new(&json!({ "z": 1, "skip": 2, "a": "x" }));
        let object = ObjectEntry::new(&options, source);

        assert_eq!(object.keys().collect::<Vec<_>>(), ["z", "a"]);
        assert!(!object.contains_key("skip"));
        assert_eq!(object.entry("a").map(|e| e.kind()), Some(EntryKind::String));
        assert_eq!(object.source(), &json!({ "z": 1, "skip": 2, "a": "x" }));
    }

    #[test]
    fn set_replaces_or_defines() {
        let options = Rc::new(Options::default());
        let mut object = ObjectEntry::new(&options, Source::new(&json!({ "a": 1 })));

        let old = object.set("a", &json!({ "nested": true }));
        assert_eq!(old.map(|e| e.kind()), Some(EntryKind::Value));
        assert_eq!(object.entry("a").map(|e| e.kind()), Some(EntryKind::Object));

        assert!(object.set("b", &json!([])).is_none());
        assert_eq!(object.keys().collect::<Vec<_>>(), ["a", "b"]);

        assert!(object.remove("a").is_some());
        assert_eq!(object.len(), 1);
        assert!(object.entry_mut("a").is_none());
    }

    #[test]
    fn scalar_source_has_no_keys() {
        let options = Rc::new(Options::default());
        assert!(ObjectEntry::new(&options, Source::new(&json!("text"))).is_empty());
        assert!(ObjectEntry::new(&options, Source::new(&json!(3))).is_empty());
    }

    #[test]
    fn nested_sources_point_into_one_copy() {
        let options = Rc::new(Options::default());
        let source = Source::new(&json!({ "a": { "b": { "c/d": [1, 2] } } }));
        let object = ObjectEntry::new(&options, source);

        let a = object.entry("a").and_then(|e| e.as_object()).unwrap();
        let b = a.entry("b").and_then(|e| e.as_object()).unwrap();
        let list = b.entry("c/d").and_then(|e| e.as_array()).unwrap();

        assert!(core::ptr::eq(b.source(), &object.source()["a"]["b"]));
        assert!(core::ptr::eq(list.source(), &object.source()["a"]["b"]["c/d"]));
        assert!(Rc::ptr_eq(list.shared_source().document(), object.shared_source().document()));
        assert_eq!(list.shared_source().pointer(), "/a/b/c~1d");
    }

    #[test]
    fn set_copies_the_new_value_once() {
        let options = Rc::new(Options::default());
        let mut object = ObjectEntry::new(&options, Source::new(&json!({})));
        object.set("n", &json!({ "k": { "v": true } }));

        let n = object.entry("n").and_then(|e| e.as_object()).unwrap();
        let k = n.entry("k").and_then(|e| e.as_object()).unwrap();

        assert!(!Rc::ptr_eq(n.shared_source().document(), object.shared_source().document()));
        assert!(Rc::ptr_eq(k.shared_source().document(), n.shared_source().document()));
        assert!(core::ptr::eq(k.source(), &n.source()["k"]));
    }
}
