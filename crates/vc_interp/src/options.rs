//! Configuration shared by every entry of a tree.

use alloc::boxed::Box;
use core::fmt;

use regex::Regex;
use serde_json::Value;
use vc_path::parse_index;

use crate::Error;
use crate::resolve::{PathResolverFactory, Resolve, ResolverFactory};

// -----------------------------------------------------------------------------
// Defaults

/// The default placeholder pattern, matching `${key}`.
///
/// The key is the shortest non-empty run of characters up to the first `}`.
pub const DEFAULT_PATTERN: &str = r"\$\{(?P<key>.+?)\}";

/// The default filter: only keys the source itself holds are wrapped.
///
/// For an array source the keys are its indices, spelled without leading zeros.
pub fn own_key(source: &Value, key: &str) -> bool {
    match source {
        Value::Object(map) => map.contains_key(key),
        Value::Array(items) => parse_index(key).is_some_and(|index| index < items.len()),
        _ => false,
    }
}

type FilterFn = dyn Fn(&Value, &str) -> bool;
type ArrayPredicateFn = dyn Fn(&Value) -> bool;

// -----------------------------------------------------------------------------
// Options

/// The configuration of a wrapped tree.
///
/// Each option can be overridden independently; unspecified options keep
/// their defaults. The finished `Options` is shared by the root and every
/// descendant entry, and consulted whenever an entry is created.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vc_interp::{Options, wrap};
///
/// let options = Options::default()
///     .with_pattern_str(r"\{\{(?P<key>.+?)\}\}")
///     .unwrap()
///     .with_filter(|_, key| !key.starts_with('_'));
///
/// let root = wrap(&json!({ "name": "db", "_secret": 1, "id": "{{name}}-1" }), options);
///
/// assert_eq!(root.get("id"), "db-1");
/// assert!(!root.contains_key("_secret"));
/// ```
pub struct Options {
    pattern: Regex,
    filter: Box<FilterFn>,
    array_predicate: Box<ArrayPredicateFn>,
    resolver_factory: Box<dyn ResolverFactory>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PATTERN).expect("the default placeholder pattern is valid"),
            filter: Box::new(own_key),
            array_predicate: Box::new(Value::is_array),
            resolver_factory: Box::new(PathResolverFactory),
        }
    }
}

impl Options {
    /// Creates the default options, see [`Options::default`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the placeholder pattern.
    ///
    /// The placeholder key is the capture group named `key` when the
    /// pattern has one. Otherwise it is the last capture group that took
    /// part in the match, so both `<<(\w+)>>` and the nested
    /// `(\$\{(.+?)\})` read the inner name. A match without a non-empty key
    /// is removed from the text without producing a value.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    /// Compiles and installs a placeholder pattern, see [`with_pattern`](Self::with_pattern).
    pub fn with_pattern_str(self, pattern: &str) -> Result<Self, Error> {
        Ok(self.with_pattern(Regex::new(pattern)?))
    }

    /// Replaces the predicate deciding which keys of a source object are wrapped.
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Value, &str) -> bool + 'static,
    {
        self.filter = Box::new(filter);
        self
    }

    /// Replaces the predicate deciding whether a container becomes an array entry.
    ///
    /// Only consulted for JSON arrays and objects.
    pub fn with_array_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        self.array_predicate = Box::new(predicate);
        self
    }

    /// Replaces the factory compiling placeholder keys into resolvers.
    pub fn with_resolver_factory<F>(mut self, factory: F) -> Self
    where
        F: ResolverFactory + 'static,
    {
        self.resolver_factory = Box::new(factory);
        self
    }

    /// Returns the placeholder pattern.
    #[inline]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Returns `true` if `key` of `source` should be wrapped.
    #[inline]
    pub fn filter(&self, source: &Value, key: &str) -> bool {
        (self.filter)(source, key)
    }

    /// Returns `true` if the container `value` should become an array entry.
    #[inline]
    pub fn is_array(&self, value: &Value) -> bool {
        (self.array_predicate)(value)
    }

    /// Compiles a placeholder key into a resolver.
    #[inline]
    pub fn compile(&self, key: &str) -> Box<dyn Resolve> {
        self.resolver_factory.compile(key)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DEFAULT_PATTERN, Options, own_key};
    use crate::Error;

    #[test]
    fn default_filter_accepts_own_keys_only() {
        let object = json!({ "a": 1, "b": null });
        assert!(own_key(&object, "a"));
        assert!(own_key(&object, "b"));
        assert!(!own_key(&object, "toString"));

        let array = json!(["x", "y"]);
        assert!(own_key(&array, "1"));
        assert!(!own_key(&array, "2"));
        assert!(!own_key(&array, "length"));
        assert!(!own_key(&array, "01"));

        assert!(!own_key(&json!("text"), "0"));
    }

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.pattern().as_str(), DEFAULT_PATTERN);
        assert!(options.filter(&json!({ "k": 1 }), "k"));
        assert!(options.is_array(&json!([])));
        assert!(!options.is_array(&json!({})));
    }

    #[test]
    fn overrides_are_independent() {
        let options = Options::new().with_array_predicate(|_| true);
        assert!(options.is_array(&json!({})));
        assert_eq!(options.pattern().as_str(), DEFAULT_PATTERN);
        assert!(!options.filter(&json!({}), "k"));
    }

    #[test]
    fn invalid_pattern() {
        let err = Options::new().with_pattern_str("${(").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
        assert!(err.to_string().starts_with("Invalid placeholder pattern"));
    }

    #[test]
    fn debug_shows_pattern() {
        let text = format!("{:?}", Options::default());
        assert!(text.contains(DEFAULT_PATTERN));
    }
}
