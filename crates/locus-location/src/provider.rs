//! Page locations and cross-reference resolution.
//!
//! [`DefaultLocationProvider`] lays out a page tree as nested directories:
//! every page with children is a directory containing an index file, and
//! every page without children is a file in its parent's directory. Links
//! between pages are emitted as the shortest relative path.
//!
//! # Thread Safety
//!
//! The provider is `Send + Sync` and can be shared via `Arc` by formats that
//! render pages in parallel. Path and reference caches are filled lazily
//! under `RwLock`s (see [`PathCache`] and [`PagesIndex`]).

use std::sync::Arc;

use locus_links::{ExternalDocLink, resolve_external};
use locus_pages::{CodeRef, PageId, PageTree, PlatformData};

use crate::cache::{PagesIndex, PathCache};
use crate::pass::PassConfig;
use crate::resolution::Resolution;

/// Segment naming the index file of a page with children.
pub const PAGE_WITH_CHILDREN_SUFFIX: &str = "index";

/// Resolves pages and cross-references to output locations.
pub trait LocationProvider: Send + Sync {
    /// Page tree being laid out.
    fn tree(&self) -> &PageTree;

    /// Output path of `node`, relative to `context` when given.
    ///
    /// Without a context the path is relative to the output root.
    fn resolve_node(&self, node: PageId, context: Option<PageId>) -> String;

    /// Link target for a cross-reference seen on the given platforms.
    ///
    /// References defined in the local tree resolve to a relative path;
    /// others are looked up in the external documentation sets registered
    /// for the platforms.
    fn resolve_reference(
        &self,
        dri: &CodeRef,
        platforms: &[PlatformData],
        context: Option<PageId>,
    ) -> Resolution;

    /// Relative path from `node` to the output root directory: one `../` per
    /// directory level, empty for a page written directly into the root.
    ///
    /// Used to reference assets shared by all pages.
    fn resolve_root(&self, node: PageId) -> String;

    /// Pages from the root down to `node`, inclusive. Empty for `None`.
    fn ancestors(&self, node: Option<PageId>) -> Vec<PageId>;

    /// Root page.
    fn top(&self) -> PageId;
}

/// Directory-per-parent [`LocationProvider`].
///
/// Construct one per generation run. Caches are owned by the instance, so
/// separate runs never observe each other's entries.
#[derive(Debug)]
pub struct DefaultLocationProvider {
    tree: Arc<PageTree>,
    passes: Vec<PassConfig>,
    extension: String,
    paths: PathCache,
    pages: PagesIndex,
}

impl DefaultLocationProvider {
    /// Create a provider for `tree`.
    ///
    /// # Arguments
    ///
    /// * `tree` - Page tree to lay out
    /// * `passes` - Documentation passes with their external documentation sets
    /// * `extension` - Output file extension including the dot (e.g. `.html`)
    pub fn new(tree: Arc<PageTree>, passes: Vec<PassConfig>, extension: impl Into<String>) -> Self {
        for (reference, pages) in tree.duplicate_references() {
            tracing::warn!(
                reference = %reference,
                pages = pages.len(),
                first = %pages[0],
                "Reference is documented by multiple pages, links go to the first one"
            );
        }

        Self {
            tree,
            passes,
            extension: extension.into(),
            paths: PathCache::new(),
            pages: PagesIndex::new(),
        }
    }

    /// Output file extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// External documentation sets registered for any of `platforms`.
    ///
    /// Sets are returned in pass order with duplicates removed.
    pub fn external_links(&self, platforms: &[PlatformData]) -> Vec<&ExternalDocLink> {
        let mut links: Vec<&ExternalDocLink> = Vec::new();
        let candidates = self
            .passes
            .iter()
            .filter(|pass| platforms.contains(&pass.platform))
            .flat_map(|pass| &pass.external_links);
        for link in candidates {
            if !links.contains(&link) {
                links.push(link);
            }
        }
        links
    }

    /// Page whose directory holds the file of `context`.
    ///
    /// Leaf pages are files in their parent's directory. `None` is the output
    /// root (a parentless leaf is written there).
    fn directory_of(&self, context: PageId) -> Option<PageId> {
        if self.tree.has_children(context) {
            Some(context)
        } else {
            self.tree.parent(context)
        }
    }

    /// Relative path without extension.
    fn path_to(&self, node: PageId, context: Option<PageId>) -> String {
        let tree = &*self.tree;

        let node_path = self.paths.path_of(tree, node);
        let context_path = context
            .and_then(|ctx| self.directory_of(ctx))
            .map(|dir| self.paths.path_of(tree, dir));
        let context_path = context_path.as_deref().unwrap_or_default();

        let common = node_path
            .iter()
            .zip(context_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<&str> = std::iter::repeat_n("..", context_path.len() - common)
            .chain(node_path[common..].iter().map(String::as_str))
            .collect();
        if tree.has_children(node) {
            segments.push(PAGE_WITH_CHILDREN_SUFFIX);
        }

        segments.join("/")
    }
}

impl LocationProvider for DefaultLocationProvider {
    fn tree(&self) -> &PageTree {
        &self.tree
    }

    fn resolve_node(&self, node: PageId, context: Option<PageId>) -> String {
        let mut path = self.path_to(node, context);
        path.push_str(&self.extension);
        path
    }

    fn resolve_reference(
        &self,
        dri: &CodeRef,
        platforms: &[PlatformData],
        context: Option<PageId>,
    ) -> Resolution {
        if let Some(page) = self.pages.find(&self.tree, dri) {
            return Resolution::Local(self.resolve_node(page, context));
        }

        match resolve_external(dri, self.external_links(platforms)) {
            Some(url) => {
                tracing::debug!(reference = %dri, url = %url, "Resolved reference externally");
                Resolution::External(url)
            }
            None => {
                tracing::debug!(
                    reference = %dri,
                    platforms = platforms.len(),
                    "Reference not found locally or in external documentation"
                );
                Resolution::Unresolved
            }
        }
    }

    fn resolve_root(&self, node: PageId) -> String {
        let depth = self
            .directory_of(node)
            .map_or(0, |dir| self.paths.path_of(&self.tree, dir).len());
        "../".repeat(depth)
    }

    fn ancestors(&self, node: Option<PageId>) -> Vec<PageId> {
        let mut chain: Vec<PageId> =
            std::iter::successors(node, |&id| self.tree.parent(id)).collect();
        chain.reverse();
        chain
    }

    fn top(&self) -> PageId {
        self.tree.root()
    }
}
