//! Output locations and cross-reference resolution for Locus.
//!
//! This crate turns pages of a [`PageTree`](locus_pages::PageTree) and
//! [`CodeRef`](locus_pages::CodeRef) cross-references into output paths:
//!
//! - [`LocationProvider`]: resolution interface consumed by formats
//! - [`DefaultLocationProvider`]: directory-per-parent layout with memoized
//!   root paths and reference lookups
//! - [`Resolution`]: local path, external URL, or unresolved
//!
//! # Layout
//!
//! A page with children becomes a directory holding an `index` file and one
//! entry per child. A page without children becomes a single file inside its
//! parent's directory:
//!
//! ```text
//! core/index.html
//! core/com.example/index.html
//! core/com.example/-foo.html
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use locus_location::{DefaultLocationProvider, LocationProvider};
//! use locus_pages::{CodeRef, PageKind, PageTreeBuilder};
//!
//! let mut builder = PageTreeBuilder::new();
//! let root = builder.add_root("core", PageKind::Module, None);
//! let pkg = builder.add_child(root, "com.example", PageKind::Package, None);
//! let foo = builder.add_child(pkg, "Foo", PageKind::Classlike, Some(CodeRef::class("com.example", "Foo")));
//! let bar = builder.add_child(pkg, "Bar", PageKind::Classlike, None);
//!
//! let provider = DefaultLocationProvider::new(Arc::new(builder.build().unwrap()), Vec::new(), ".html");
//! assert_eq!(provider.resolve_node(foo, None), "core/com.example/-foo.html");
//! assert_eq!(provider.resolve_node(foo, Some(bar)), "-foo.html");
//! ```

mod cache;
mod pass;
mod provider;
mod resolution;

pub use cache::{PagesIndex, PathCache};
pub use pass::PassConfig;
pub use provider::{DefaultLocationProvider, LocationProvider, PAGE_WITH_CHILDREN_SUFFIX};
pub use resolution::Resolution;
