//! Documentation page tree for Locus.
//!
//! This crate provides the immutable page graph consumed by location
//! resolution:
//!
//! - [`PageTree`]: arena of pages with a side table of parent indices
//! - [`PageTreeBuilder`]: incremental construction with a single root
//! - [`CodeRef`]: structured reference to a documented program element
//! - [`PlatformData`]: compilation target used to pick external doc sets
//!
//! # Example
//!
//! ```
//! use locus_pages::{CodeRef, PageKind, PageTreeBuilder};
//!
//! let mut builder = PageTreeBuilder::new();
//! let root = builder.add_root("core", PageKind::Module, None);
//! let pkg = builder.add_child(root, "com.example", PageKind::Package, Some(CodeRef::package("com.example")));
//! builder.add_child(pkg, "Foo", PageKind::Classlike, Some(CodeRef::class("com.example", "Foo")));
//! let tree = builder.build().unwrap();
//!
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.children(pkg).len(), 1);
//! ```

mod manifest;
mod platform;
mod reference;
mod tree;

pub use manifest::PageManifest;
pub use platform::{Platform, PlatformData};
pub use reference::{Callable, CodeRef};
pub use tree::{PageId, PageKind, PageNode, PageTree, PageTreeBuilder, Preorder, TreeError};
