use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use serde_json::Value;
use vc_path::{AccessErrorKind, Accessor, PathAccessError, PathAccessor, Traverse, walk_path};

use crate::view::property_key;
use crate::{
    ArrayEntry, Current, Entry, EntryKind, Error, ObjectEntry, ObjectRef, Options, Source,
    Template,
};

// -----------------------------------------------------------------------------
// RootEntry

/// The top of a live tree.
///
/// Owns every entry of the tree and the [`Options`] they share. Placeholders
/// anywhere in the tree resolve against the root.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_interp::{Options, wrap};
///
/// let mut root = wrap(
///     &json!({ "host": "localhost", "url": "http://${host}/" }),
///     Options::default(),
/// );
/// assert_eq!(root.get("url"), "http://localhost/");
///
/// root.set("host", &json!("example.com"));
/// assert_eq!(root.get("url"), "http://example.com/");
/// ```
#[derive(Debug)]
pub struct RootEntry {
    object: ObjectEntry,
}

impl RootEntry {
    /// Wraps `source`.
    ///
    /// An object source wraps its keys and an array source wraps its indices
    /// as keys `"0"`, `"1"`, .... Any other source gives an empty root.
    pub fn new(source: &Value, options: Options) -> Self {
        let options = Rc::new(options);
        let object = ObjectEntry::new(&options, Source::new(source));
        log::trace!("wrapped a live tree with {} root keys", object.len());
        Self { object }
    }

    #[inline]
    pub const fn kind(&self) -> EntryKind {
        EntryKind::Root
    }

    #[inline]
    pub fn options(&self) -> &Options {
        self.object.options()
    }

    /// Returns the raw value the tree was wrapped from.
    #[inline]
    pub fn source(&self) -> &Value {
        self.object.source()
    }

    #[inline]
    pub fn as_object(&self) -> &ObjectEntry {
        &self.object
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> &mut ObjectEntry {
        &mut self.object
    }

    /// Returns a read-only view of the root.
    #[inline]
    pub fn view(&self) -> ObjectRef<'_> {
        ObjectRef::new(&self.object, self)
    }

    /// Returns the root as a [`Current`] object.
    #[inline]
    pub fn current(&self) -> Current<'_> {
        Current::Object(self.view())
    }

    /// Returns the current value of the root key `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Current<'_> {
        self.view().get(key)
    }

    #[inline]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.object.entry(key)
    }

    #[inline]
    pub fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.object.entry_mut(key)
    }

    /// Replaces the root key `key`, see [`ObjectEntry::set`].
    #[inline]
    pub fn set(&mut self, key: &str, raw: &Value) -> Option<Entry> {
        self.object.set(key, raw)
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.object.remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.object.contains_key(key)
    }

    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.object.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.object.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.object.is_empty()
    }

    /// Resolves `path` against the tree, the way a `${path}` placeholder would.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use vc_interp::{Options, wrap};
    ///
    /// let root = wrap(&json!({ "db": { "ports": [5432, 5433] } }), Options::default());
    ///
    /// assert_eq!(root.get_path("db.ports[1]").as_u64(), Some(5433));
    /// assert_eq!(root.get_path("db.ports.length").as_u64(), Some(2));
    /// assert!(root.get_path("db.user").is_undefined());
    /// ```
    pub fn get_path(&self, path: &str) -> Current<'_> {
        if self.contains_key(path) {
            return self.get(path);
        }
        match walk_path(self.current(), path) {
            Ok(current) => current,
            Err(PathAccessError::ParseError(err)) => {
                log::debug!("cannot read an invalid path: {err}");
                Current::Undefined
            }
            Err(PathAccessError::AccessError(_)) => Current::Undefined,
        }
    }

    /// Writes `raw` at `path`, replacing the entry found there.
    ///
    /// Every segment but the last must lead to an existing container. The
    /// last segment names the key or index to write; on an array, `length`
    /// sets the array's length instead. As with reads, a root key spelled
    /// like the whole path is written directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use vc_interp::{Options, wrap};
    ///
    /// let mut root = wrap(
    ///     &json!({ "db": { "hosts": ["a", "b"] }, "first": "${db.hosts[0]}" }),
    ///     Options::default(),
    /// );
    ///
    /// root.set_path("db.hosts[0]", &json!("z")).unwrap();
    /// root.set_path("db.hosts.length", &json!(1)).unwrap();
    ///
    /// assert_eq!(root.get("first"), "z");
    /// assert_eq!(root.to_json()["db"], json!({ "hosts": ["z"] }));
    /// assert!(root.set_path("first.x", &json!(0)).is_err());
    /// ```
    pub fn set_path(&mut self, path: &str, raw: &Value) -> Result<(), Error> {
        if self.contains_key(path) {
            self.set(path, raw);
            return Ok(());
        }

        let accessor = PathAccessor::parse(path).map_err(|err| Error::invalid_path(path, err))?;
        let Some((last, parents)) = accessor.split_last() else {
            return Err(Error::invalid_path(path, "the path is empty"));
        };

        let mut node = NodeMut::Object(&mut self.object);
        for parent in parents {
            node = parent
                .access(node)
                .map_err(|err| Error::invalid_path(path, err))?;
        }

        match node {
            NodeMut::Object(object) => {
                object.set(&property_key(&last.accessor), raw);
                Ok(())
            }
            NodeMut::Array(array) => write_array(array, &last.accessor, raw),
            NodeMut::Leaf(kind) => Err(Error::NotAContainer {
                path: path.into(),
                kind,
            }),
        }
    }

    /// Parses `template` and evaluates it once against the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use vc_interp::{Options, wrap};
    ///
    /// let root = wrap(&json!({ "user": "ann", "ids": [1, 2] }), Options::default());
    /// assert_eq!(root.render("${user}: ${ids}"), "ann: 1,2");
    /// ```
    pub fn render(&self, template: &str) -> String {
        Template::parse(template, self.options()).render(self)
    }

    /// Unwraps the tree into plain JSON with every string evaluated.
    ///
    /// See [`Current::to_json`].
    #[inline]
    pub fn to_json(&self) -> Value {
        self.view().to_json()
    }
}

impl fmt::Display for RootEntry {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[object Object]")
    }
}

fn write_array(array: &mut ArrayEntry, accessor: &Accessor<'_>, raw: &Value) -> Result<(), Error> {
    if accessor.as_key() == Some("length") {
        let len = raw
            .as_u64()
            .and_then(|len| usize::try_from(len).ok())
            .ok_or_else(|| Error::InvalidLength(raw.clone()))?;
        array.set_len(len);
        return Ok(());
    }

    let index = accessor
        .as_index()
        .ok_or_else(|| Error::InvalidIndex(property_key(accessor).into_owned()))?;
    array.set(index, raw)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Mutable traversal

/// A mutable handle to a node met while walking a write path.
enum NodeMut<'a> {
    Object(&'a mut ObjectEntry),
    Array(&'a mut ArrayEntry),
    Leaf(EntryKind),
}

impl<'a> From<&'a mut Entry> for NodeMut<'a> {
    fn from(entry: &'a mut Entry) -> Self {
        match entry {
            Entry::Object(object) => Self::Object(object),
            Entry::Array(array) => Self::Array(array),
            Entry::Value(_) => Self::Leaf(EntryKind::Value),
            Entry::String(_) => Self::Leaf(EntryKind::String),
        }
    }
}

impl Traverse for NodeMut<'_> {
    fn step(self, accessor: &Accessor<'_>) -> Result<Self, AccessErrorKind> {
        match self {
            Self::Object(object) => object
                .entry_mut(&property_key(accessor))
                .map(NodeMut::from)
                .ok_or(AccessErrorKind::MissingField("object")),
            Self::Array(array) => accessor
                .as_index()
                .and_then(|index| array.get_mut(index))
                .map(NodeMut::from)
                .ok_or(AccessErrorKind::MissingField("array")),
            Self::Leaf(kind) => Err(AccessErrorKind::IncompatibleKind(kind.name())),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
