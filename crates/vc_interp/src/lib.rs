#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Alloc paths

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod entry;
mod error;
mod options;
mod resolve;
mod root;
mod serialize;
mod template;
mod view;

// -----------------------------------------------------------------------------
// Exports

pub use entry::{
    ArrayEntry, Entry, EntryKind, ObjectEntry, Scalar, Source, StringEntry, ValueEntry,
};
pub use error::Error;
pub use options::{DEFAULT_PATTERN, Options, own_key};
pub use resolve::{PathResolver, PathResolverFactory, Resolve, ResolverFactory, resolver_fn};
pub use root::RootEntry;
pub use template::{Segment, Template};
pub use view::{ArrayRef, Current, ObjectRef};

pub use serde_json::Value;

// -----------------------------------------------------------------------------
// Entry point

/// Wraps `source` into a live tree configured by `options`.
///
/// See [`RootEntry::new`].
#[inline]
pub fn wrap(source: &Value, options: Options) -> RootEntry {
    RootEntry::new(source, options)
}
