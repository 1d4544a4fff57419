//! Memoized root paths and reference lookups.
//!
//! Both caches live as long as the provider that owns them (one generation
//! run). The page tree is immutable, so entries are never invalidated.
//!
//! # Thread Safety
//!
//! Entries are stored behind an `RwLock`: lookups take the read lock, and the
//! first computation of a key takes the write lock to insert. Two threads may
//! compute the same key concurrently; values are deterministic, so whichever
//! insert lands first is kept.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use locus_links::identifier_to_filename;
use locus_pages::{CodeRef, PageId, PageKind, PageTree};

/// Segment used for a package page with an empty name.
const EMPTY_PACKAGE_SEGMENT: &str = "root";

/// Root-to-page path segments, memoized by page identity.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: RwLock<HashMap<PageId, Arc<[String]>>>,
}

impl PathCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path segments from the root of `tree` to `node`, inclusive.
    ///
    /// Package pages use their name verbatim; other pages are sanitized with
    /// [`identifier_to_filename`].
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn path_of(&self, tree: &PageTree, node: PageId) -> Arc<[String]> {
        if let Some(path) = self.entries.read().unwrap().get(&node) {
            return Arc::clone(path);
        }

        let path: Arc<[String]> = compute_path(tree, node).into();
        tracing::trace!(page = %node, depth = path.len(), "Cached page path");

        let mut entries = self.entries.write().unwrap();
        Arc::clone(entries.entry(node).or_insert(path))
    }

    /// Number of cached paths.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether no path has been cached yet.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn compute_path(tree: &PageTree, node: PageId) -> Vec<String> {
    let mut path: Vec<String> = std::iter::successors(Some(node), |&id| tree.parent(id))
        .map(|id| segment_name(tree, id))
        .collect();
    path.reverse();
    path
}

fn segment_name(tree: &PageTree, id: PageId) -> String {
    let page = tree.node(id);
    match page.kind {
        PageKind::Package if page.name.is_empty() => EMPTY_PACKAGE_SEGMENT.to_owned(),
        PageKind::Package => page.name.clone(),
        _ => identifier_to_filename(&page.name),
    }
}

/// Reference-to-page lookups, memoized including misses.
///
/// A cached `None` records that the reference is not defined in the tree;
/// an absent entry means the tree has not been searched yet.
#[derive(Debug, Default)]
pub struct PagesIndex {
    entries: RwLock<HashMap<CodeRef, Option<PageId>>>,
}

impl PagesIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First page in pre-order whose reference equals `dri`.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn find(&self, tree: &PageTree, dri: &CodeRef) -> Option<PageId> {
        if let Some(&cached) = self.entries.read().unwrap().get(dri) {
            return cached;
        }

        let found = tree.find_first(|page| page.reference.as_ref() == Some(dri));
        tracing::trace!(reference = %dri, found = found.is_some(), "Cached reference lookup");

        *self
            .entries
            .write()
            .unwrap()
            .entry(dri.clone())
            .or_insert(found)
    }

    /// Whether a lookup for `dri` (hit or miss) is cached.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn is_cached(&self, dri: &CodeRef) -> bool {
        self.entries.read().unwrap().contains_key(dri)
    }
}
