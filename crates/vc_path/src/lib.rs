#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod path;
mod path_access;
mod string_parser;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{AccessError, AccessErrorKind};
pub use accessor::{Accessor, OffsetAccessor, is_index_key, parse_index};
pub use path::{AccessPath, ParseError};
pub use path_access::{PathAccessError, PathAccessor, Traverse, walk_path};
pub use string_parser::PathParser;
