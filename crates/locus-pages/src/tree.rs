//! Page tree arena.
//!
//! Pages are stored in a flat `Vec<PageNode>` with parent/children
//! relationships tracked by indices. Nodes never store references to their
//! parent; the parent relation is a side table kept consistent with the
//! children lists by [`PageTreeBuilder`].
//!
//! This provides:
//! - O(1) parent and children lookups by [`PageId`]
//! - O(d) ancestor walks where d is the page depth
//! - Cheap identity: two pages are the same page iff their ids are equal

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::CodeRef;

/// Stable index of a page inside its [`PageTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

impl PageId {
    /// Position of the page in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of documentation page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// Module root page.
    Module,
    /// Package page. Its name is used verbatim as a directory name.
    Package,
    /// Class, interface, object or other type-like declaration.
    Classlike,
    /// Function or property page.
    Member,
    /// Any other structural page.
    #[default]
    Other,
}

/// Page data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageNode {
    /// Display name.
    pub name: String,
    /// Page kind.
    pub kind: PageKind,
    /// Code element documented by this page, if any.
    pub reference: Option<CodeRef>,
    /// Code elements this page refers to (supertypes, signature types, ...),
    /// in display order.
    pub links: Vec<CodeRef>,
}

/// Error returned when a page tree cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// No page was added.
    #[error("Page tree has no root")]
    Empty,
    /// More than one page was added without a parent.
    #[error("Page tree has {count} roots, expected exactly one")]
    MultipleRoots {
        /// Number of parentless pages.
        count: usize,
    },
}

/// Immutable documentation page tree.
///
/// Built once per generation run by [`PageTreeBuilder`]. Exactly one page has
/// no parent; every other page has exactly one parent and appears exactly once
/// in that parent's children list.
#[derive(Debug)]
pub struct PageTree {
    pages: Vec<PageNode>,
    children: Vec<Vec<PageId>>,
    parents: Vec<Option<PageId>>,
    root: PageId,
}

impl PageTree {
    /// Root page.
    #[must_use]
    pub fn root(&self) -> PageId {
        self.root
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`: a built tree contains at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get page data.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: PageId) -> &PageNode {
        &self.pages[id.0]
    }

    /// Children of a page in display order.
    #[must_use]
    pub fn children(&self, id: PageId) -> &[PageId] {
        &self.children[id.0]
    }

    /// Whether a page has children (and is therefore emitted as a directory).
    #[must_use]
    pub fn has_children(&self, id: PageId) -> bool {
        !self.children[id.0].is_empty()
    }

    /// Parent of a page, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: PageId) -> Option<PageId> {
        self.parents[id.0]
    }

    /// Depth-first pre-order traversal from the root.
    ///
    /// A page is visited before its children, and all descendants of a child
    /// are visited before that child's next sibling.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// First page in pre-order for which `predicate` holds.
    pub fn find_first(&self, mut predicate: impl FnMut(&PageNode) -> bool) -> Option<PageId> {
        self.preorder().find(|&id| predicate(self.node(id)))
    }

    /// References carried by more than one page, with the carrying pages in
    /// pre-order.
    #[must_use]
    pub fn duplicate_references(&self) -> Vec<(&CodeRef, Vec<PageId>)> {
        let mut seen: HashMap<&CodeRef, Vec<PageId>> = HashMap::new();
        let mut order = Vec::new();
        for id in self.preorder() {
            if let Some(reference) = &self.node(id).reference {
                let ids = seen.entry(reference).or_insert_with(|| {
                    order.push(reference);
                    Vec::new()
                });
                ids.push(id);
            }
        }

        order
            .into_iter()
            .filter_map(|reference| {
                let ids = seen.remove(reference)?;
                (ids.len() > 1).then_some((reference, ids))
            })
            .collect()
    }
}

/// Pre-order iterator over a [`PageTree`].
pub struct Preorder<'a> {
    tree: &'a PageTree,
    stack: Vec<PageId>,
}

impl Iterator for Preorder<'_> {
    type Item = PageId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

/// Builder for constructing [`PageTree`] instances.
#[derive(Debug, Default)]
pub struct PageTreeBuilder {
    pages: Vec<PageNode>,
    children: Vec<Vec<PageId>>,
    parents: Vec<Option<PageId>>,
    roots: Vec<PageId>,
}

impl PageTreeBuilder {
    /// Create a new tree builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page without a parent.
    ///
    /// A tree must have exactly one such page; [`build`](Self::build) fails
    /// otherwise.
    pub fn add_root(
        &mut self,
        name: impl Into<String>,
        kind: PageKind,
        reference: Option<CodeRef>,
    ) -> PageId {
        self.push(name.into(), kind, reference, None)
    }

    /// Add a page as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this builder.
    pub fn add_child(
        &mut self,
        parent: PageId,
        name: impl Into<String>,
        kind: PageKind,
        reference: Option<CodeRef>,
    ) -> PageId {
        assert!(parent.0 < self.pages.len(), "unknown parent page {parent}");
        self.push(name.into(), kind, reference, Some(parent))
    }

    fn push(
        &mut self,
        name: String,
        kind: PageKind,
        reference: Option<CodeRef>,
        parent: Option<PageId>,
    ) -> PageId {
        let id = PageId(self.pages.len());

        self.pages.push(PageNode {
            name,
            kind,
            reference,
            links: Vec::new(),
        });
        self.children.push(Vec::new());
        self.parents.push(parent);

        if let Some(parent) = parent {
            self.children[parent.0].push(id);
        } else {
            self.roots.push(id);
        }

        id
    }

    /// Record that `page` refers to `target`.
    ///
    /// # Panics
    ///
    /// Panics if `page` was not returned by this builder.
    pub fn add_link(&mut self, page: PageId, target: CodeRef) {
        self.pages[page.0].links.push(target);
    }

    /// Build the [`PageTree`].
    pub fn build(self) -> Result<PageTree, TreeError> {
        let root = match self.roots.as_slice() {
            [] => return Err(TreeError::Empty),
            [root] => *root,
            roots => return Err(TreeError::MultipleRoots { count: roots.len() }),
        };

        Ok(PageTree {
            pages: self.pages,
            children: self.children,
            parents: self.parents,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (PageTree, [PageId; 5]) {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_root("core", PageKind::Module, None);
        let a = builder.add_child(root, "a", PageKind::Package, Some(CodeRef::package("a")));
        let foo = builder.add_child(a, "Foo", PageKind::Classlike, Some(CodeRef::class("a", "Foo")));
        let b = builder.add_child(root, "b", PageKind::Package, Some(CodeRef::package("b")));
        let bar = builder.add_child(b, "Bar", PageKind::Classlike, Some(CodeRef::class("b", "Bar")));
        (builder.build().unwrap(), [root, a, foo, b, bar])
    }

    #[test]
    fn test_add_root_returns_index() {
        let mut builder = PageTreeBuilder::new();

        let id = builder.add_root("core", PageKind::Module, None);

        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_add_child_links_parent_and_children() {
        let (tree, [root, a, foo, b, _]) = sample_tree();

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(foo), Some(a));
        assert_eq!(tree.parent(root), None);
        assert!(tree.has_children(a));
        assert!(!tree.has_children(foo));
    }

    #[test]
    fn test_add_link_keeps_order() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_root("core", PageKind::Module, None);
        builder.add_link(root, CodeRef::class("java.util", "List"));
        builder.add_link(root, CodeRef::package("kotlin"));
        let tree = builder.build().unwrap();

        assert_eq!(
            tree.node(root).links,
            vec![CodeRef::class("java.util", "List"), CodeRef::package("kotlin")]
        );
    }

    #[test]
    fn test_build_empty_fails() {
        let result = PageTreeBuilder::new().build();

        assert!(matches!(result, Err(TreeError::Empty)));
    }

    #[test]
    fn test_build_multiple_roots_fails() {
        let mut builder = PageTreeBuilder::new();
        builder.add_root("a", PageKind::Module, None);
        builder.add_root("b", PageKind::Module, None);

        let result = builder.build();

        assert!(matches!(result, Err(TreeError::MultipleRoots { count: 2 })));
    }

    #[test]
    fn test_preorder_visits_children_before_siblings() {
        let (tree, [root, a, foo, b, bar]) = sample_tree();

        let order: Vec<PageId> = tree.preorder().collect();

        assert_eq!(order, vec![root, a, foo, b, bar]);
    }

    #[test]
    fn test_find_first_returns_first_in_preorder() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_root("core", PageKind::Module, None);
        let a = builder.add_child(root, "a", PageKind::Package, None);
        let deep = builder.add_child(a, "X", PageKind::Classlike, None);
        builder.add_child(root, "X", PageKind::Classlike, None);
        let tree = builder.build().unwrap();

        let found = tree.find_first(|node| node.name == "X");

        assert_eq!(found, Some(deep));
    }

    #[test]
    fn test_find_first_missing_returns_none() {
        let (tree, _) = sample_tree();

        assert_eq!(tree.find_first(|node| node.name == "Nope"), None);
    }

    #[test]
    fn test_duplicate_references_reported_in_preorder() {
        let mut builder = PageTreeBuilder::new();
        let root = builder.add_root("core", PageKind::Module, None);
        let dri = CodeRef::class("a", "Foo");
        let first = builder.add_child(root, "Foo", PageKind::Classlike, Some(dri.clone()));
        let second = builder.add_child(root, "Foo", PageKind::Classlike, Some(dri.clone()));
        builder.add_child(root, "Bar", PageKind::Classlike, Some(CodeRef::class("a", "Bar")));
        let tree = builder.build().unwrap();

        let duplicates = tree.duplicate_references();

        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].0, &dri);
        assert_eq!(duplicates[0].1, vec![first, second]);
    }

    #[test]
    fn test_duplicate_references_empty_for_unique_tree() {
        let (tree, _) = sample_tree();

        assert!(tree.duplicate_references().is_empty());
    }
}
