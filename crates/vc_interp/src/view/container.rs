use core::{fmt, ptr};

use serde_json::{Map, Value};

use crate::{ArrayEntry, Current, Entry, EntryKind, ObjectEntry, RootEntry};

// -----------------------------------------------------------------------------
// ObjectRef

/// A read-only view of an object entry, or of the root itself.
#[derive(Clone, Copy)]
pub struct ObjectRef<'r> {
    entry: &'r ObjectEntry,
    root: &'r RootEntry,
}

impl<'r> ObjectRef<'r> {
    #[inline]
    pub(crate) fn new(entry: &'r ObjectEntry, root: &'r RootEntry) -> Self {
        Self { entry, root }
    }

    /// Returns `EntryKind::Root` when viewing the root, `EntryKind::Object` otherwise.
    pub fn kind(&self) -> EntryKind {
        if ptr::eq(self.entry, self.root.as_object()) {
            EntryKind::Root
        } else {
            EntryKind::Object
        }
    }

    #[inline]
    pub fn as_entry(&self) -> &'r ObjectEntry {
        self.entry
    }

    #[inline]
    pub fn root(&self) -> &'r RootEntry {
        self.root
    }

    /// Returns the current value at `key`, `Undefined` if there is no such key.
    #[inline]
    pub fn get(&self, key: &str) -> Current<'r> {
        self.entry(key)
            .map_or(Current::Undefined, |entry| entry.current(self.root))
    }

    #[inline]
    pub fn entry(&self, key: &str) -> Option<&'r Entry> {
        self.entry.entry(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entry.contains_key(key)
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'r str> + use<'r> {
        self.entry.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Iterates over the keys and their current values, in definition order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'r str, Current<'r>)> + use<'r> {
        let root = self.root;
        self.entry
            .iter()
            .map(move |(key, entry)| (key, entry.current(root)))
    }

    /// See [`Current::to_json`].
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, value) in self.iter() {
            if !value.is_undefined() {
                map.insert(key.into(), value.to_json());
            }
        }
        Value::Object(map)
    }

    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        ptr::eq(self.entry, other.entry)
    }
}

impl fmt::Display for ObjectRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[object Object]")
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// ArrayRef

/// A read-only view of an array entry.
#[derive(Clone, Copy)]
pub struct ArrayRef<'r> {
    entry: &'r ArrayEntry,
    root: &'r RootEntry,
}

impl<'r> ArrayRef<'r> {
    #[inline]
    pub(crate) fn new(entry: &'r ArrayEntry, root: &'r RootEntry) -> Self {
        Self { entry, root }
    }

    #[inline]
    pub fn as_entry(&self) -> &'r ArrayEntry {
        self.entry
    }

    #[inline]
    pub fn root(&self) -> &'r RootEntry {
        self.root
    }

    /// Returns the current value at `index`, `Undefined` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Current<'r> {
        self.entry(index)
            .map_or(Current::Undefined, |entry| entry.current(self.root))
    }

    #[inline]
    pub fn entry(&self, index: usize) -> Option<&'r Entry> {
        self.entry.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Current<'r>> + use<'r> {
        let root = self.root;
        self.entry.iter().map(move |entry| entry.current(root))
    }

    /// See [`Current::to_json`].
    pub fn to_json(&self) -> Value {
        Value::Array(self.iter().map(|value| value.to_json()).collect())
    }

    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        ptr::eq(self.entry, other.entry)
    }
}

impl fmt::Display for ArrayRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            if !value.is_undefined() && !value.is_null() {
                fmt::Display::fmt(&value, f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ArrayRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Current, EntryKind, Options, wrap};

    #[test]
    fn object_view() {
        let root = wrap(
            &json!({ "name": "db", "conn": { "host": "h", "url": "${name}@${conn.host}" } }),
            Options::default(),
        );

        let conn = root.get("conn").as_object().unwrap();
        assert_eq!(conn.kind(), EntryKind::Object);
        assert_eq!(root.view().kind(), EntryKind::Root);
        assert_eq!(conn.len(), 2);
        assert!(conn.contains_key("url"));
        assert_eq!(conn.keys().collect::<Vec<_>>(), ["host", "url"]);
        assert_eq!(conn.get("url"), "db@h");
        assert!(conn.get("port").is_undefined());

        let pairs: Vec<_> = conn
            .iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        assert_eq!(pairs, [("host", "h".to_owned()), ("url", "db@h".to_owned())]);
    }

    #[test]
    fn array_view() {
        let root = wrap(&json!({ "n": 2, "xs": ["${n}", 3] }), Options::default());

        let xs = root.get("xs").as_array().unwrap();
        assert_eq!(xs.len(), 2);
        assert_eq!(xs.get(0), "2");
        assert_eq!(xs.get(1).as_u64(), Some(3));
        assert_eq!(xs.get(2), Current::Undefined);
        assert_eq!(xs.to_json(), json!(["2", 3]));
        assert_eq!(xs.iter().count(), 2);
    }

    #[test]
    fn export_fills_undefined_elements() {
        let mut root = wrap(&json!({ "a": 1, "xs": [1] }), Options::default());
        root.set("gone", &json!({}));
        root.entry_mut("xs")
            .and_then(|e| e.as_array_mut())
            .unwrap()
            .set_len(2);
        root.as_object_mut()
            .entry_mut("gone")
            .and_then(|e| e.as_object_mut())
            .unwrap()
            .set("x", &json!(null));

        assert_eq!(
            root.to_json(),
            json!({ "a": 1, "xs": [1, null], "gone": { "x": null } })
        );

        let view = root.view();
        let xs = view.get("xs").as_array().unwrap();
        assert!(xs.get(1).is_undefined());
        assert_eq!(xs.to_string(), "1,");
    }
}
