#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_interp as interp;
pub use vc_path as path;

pub use vc_interp::{Current, Error, Options, RootEntry, wrap};
