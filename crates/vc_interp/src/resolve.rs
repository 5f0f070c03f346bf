//! Compiled placeholder lookups.
//!
//! A placeholder key is compiled once, when its string entry is created,
//! into a [`Resolve`] implementation. The resolver is then run against the
//! root every time the string is read.

use alloc::boxed::Box;
use core::fmt;

use vc_path::PathAccessor;

use crate::{Current, RootEntry};

// -----------------------------------------------------------------------------
// Traits

/// A compiled lookup of one placeholder against the live tree.
pub trait Resolve {
    /// Returns the current value of the placeholder.
    ///
    /// A value that cannot be found is [`Current::Undefined`].
    fn resolve<'r>(&self, root: &'r RootEntry) -> Current<'r>;
}

/// Compiles placeholder keys into [`Resolve`] implementations.
///
/// Implemented for `Fn(&str) -> Box<dyn Resolve>`.
pub trait ResolverFactory {
    /// Compiles `key`, the text captured by the placeholder pattern.
    fn compile(&self, key: &str) -> Box<dyn Resolve>;
}

impl<F> ResolverFactory for F
where
    F: Fn(&str) -> Box<dyn Resolve>,
{
    #[inline]
    fn compile(&self, key: &str) -> Box<dyn Resolve> {
        self(key)
    }
}

// -----------------------------------------------------------------------------
// Closure resolver

struct FnResolver<F>(F);

impl<F> Resolve for FnResolver<F>
where
    F: for<'r> Fn(&'r RootEntry) -> Current<'r>,
{
    #[inline]
    fn resolve<'r>(&self, root: &'r RootEntry) -> Current<'r> {
        (self.0)(root)
    }
}

/// Boxes a closure as a resolver.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_interp::{Current, Options, Resolve, resolver_fn, wrap};
///
/// let options = Options::default().with_resolver_factory(|key: &str| -> Box<dyn Resolve> {
///     match key {
///         "count" => resolver_fn(|root| match root.get("items").as_array() {
///             Some(items) => Current::from(items.len()),
///             None => Current::Undefined,
///         }),
///         other => vc_interp::PathResolver::boxed(other),
///     }
/// });
///
/// let root = wrap(&json!({ "items": [1, 2, 3], "label": "${count} items" }), options);
/// assert_eq!(root.get("label"), "3 items");
/// ```
pub fn resolver_fn<F>(f: F) -> Box<dyn Resolve>
where
    F: for<'r> Fn(&'r RootEntry) -> Current<'r> + 'static,
{
    Box::new(FnResolver(f))
}

// -----------------------------------------------------------------------------
// Path resolver

/// The default resolver: a dotted/bracketed path walked from the root.
///
/// If the root has a key spelled exactly like the whole placeholder text,
/// that key wins over the path interpretation, so `${a.b}` reads a root key
/// named `a.b` when one exists.
///
/// A key that does not parse as a path can still match a root key that way;
/// otherwise it always resolves to [`Current::Undefined`].
pub struct PathResolver {
    key: Box<str>,
    accessor: Option<PathAccessor>,
}

impl PathResolver {
    /// Compiles `key`.
    pub fn new(key: &str) -> Self {
        let accessor = match PathAccessor::parse(key) {
            Ok(accessor) => Some(accessor),
            Err(err) => {
                log::debug!("placeholder key is not a valid path: {err}");
                None
            }
        };

        Self {
            key: key.into(),
            accessor,
        }
    }

    /// Compiles `key` into a boxed resolver.
    #[inline]
    pub fn boxed(key: &str) -> Box<dyn Resolve> {
        Box::new(Self::new(key))
    }

    /// Returns the placeholder text this resolver was compiled from.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the parsed path, if the key was a valid path.
    #[inline]
    pub fn accessor(&self) -> Option<&PathAccessor> {
        self.accessor.as_ref()
    }
}

impl Resolve for PathResolver {
    fn resolve<'r>(&self, root: &'r RootEntry) -> Current<'r> {
        if root.contains_key(&self.key) {
            return root.get(&self.key);
        }
        match &self.accessor {
            Some(accessor) => accessor.walk(root.current()).unwrap_or(Current::Undefined),
            None => Current::Undefined,
        }
    }
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("key", &self.key)
            .field("accessor", &self.accessor)
            .finish()
    }
}

/// The default [`ResolverFactory`], producing [`PathResolver`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolverFactory;

impl ResolverFactory for PathResolverFactory {
    #[inline]
    fn compile(&self, key: &str) -> Box<dyn Resolve> {
        PathResolver::boxed(key)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{PathResolver, Resolve};
    use crate::{Options, wrap};

    #[test]
    fn walks_nested_paths() {
        let root = wrap(
            &json!({ "db": { "hosts": [{ "name": "alpha" }, { "name": "beta" }] } }),
            Options::default(),
        );

        assert_eq!(PathResolver::new("db.hosts[1].name").resolve(&root), "beta");
        assert_eq!(PathResolver::new("db.hosts.0.name").resolve(&root), "alpha");
        assert_eq!(
            PathResolver::new("db.hosts.length").resolve(&root).as_u64(),
            Some(2)
        );
        assert!(PathResolver::new("db.ports[0]").resolve(&root).is_undefined());
        assert!(PathResolver::new("db.hosts[0].name.first").resolve(&root).is_undefined());
    }

    #[test]
    fn whole_key_wins_over_path() {
        let root = wrap(
            &json!({ "a.b": "literal", "a": { "b": "nested" } }),
            Options::default(),
        );
        assert_eq!(PathResolver::new("a.b").resolve(&root), "literal");
        assert_eq!(PathResolver::new("a[\"b\"]").resolve(&root), "nested");
    }

    #[test]
    fn unparseable_key() {
        let root = wrap(&json!({ "a]": 1, "b": 2 }), Options::default());

        let resolver = PathResolver::new("b[");
        assert!(resolver.accessor().is_none());
        assert!(resolver.resolve(&root).is_undefined());

        let resolver = PathResolver::new("a]");
        assert!(resolver.accessor().is_none());
        assert_eq!(resolver.resolve(&root).as_i64(), Some(1));
    }

    #[test]
    fn string_length() {
        let root = wrap(&json!({ "word": "héllo" }), Options::default());
        assert_eq!(PathResolver::new("word.length").resolve(&root).as_u64(), Some(5));
    }
}
