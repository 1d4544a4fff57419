//! Format service interface.

use locus_location::{LocationProvider, Resolution};
use locus_pages::{CodeRef, PageId, PageNode, PlatformData};

/// Location context for rendering one output file.
///
/// Links emitted while rendering are relative to [`page`](Self::page).
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Provider used to resolve links.
    pub provider: &'a dyn LocationProvider,
    /// Page whose file is being rendered.
    pub page: PageId,
    /// Platforms the page documents, used for external references.
    pub platforms: &'a [PlatformData],
}

impl<'a> RenderContext<'a> {
    /// Create a context for rendering `page`.
    pub fn new(
        provider: &'a dyn LocationProvider,
        page: PageId,
        platforms: &'a [PlatformData],
    ) -> Self {
        Self {
            provider,
            page,
            platforms,
        }
    }

    /// Page data of `id`.
    pub fn node(&self, id: PageId) -> &'a PageNode {
        self.provider.tree().node(id)
    }

    /// Relative link from the current page to `target`.
    pub fn link_to(&self, target: PageId) -> String {
        self.provider.resolve_node(target, Some(self.page))
    }

    /// Link target of a cross-reference seen on the current page.
    pub fn link_reference(&self, dri: &CodeRef) -> Resolution {
        self.provider
            .resolve_reference(dri, self.platforms, Some(self.page))
    }

    /// Relative path from the current page to the output root, ending in `/`.
    pub fn root(&self) -> String {
        self.provider.resolve_root(self.page)
    }
}

/// Short display text for a cross-reference: `Class.member(params)`,
/// `Outer.Inner`, or the package name.
pub(crate) fn reference_label(dri: &CodeRef) -> String {
    match (&dri.class_names, &dri.callable) {
        (Some(class_names), Some(callable)) => {
            format!("{class_names}.{}({})", callable.name, callable.params.join(", "))
        }
        (None, Some(callable)) => format!("{}({})", callable.name, callable.params.join(", ")),
        (Some(class_names), None) => class_names.clone(),
        (None, None) => dri.package.clone().unwrap_or_default(),
    }
}

/// Auxiliary file a format needs in the output tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupportFile {
    /// Resource name inside the format.
    pub resource: &'static str,
    /// Destination relative to the output root.
    pub target_path: String,
    /// File contents.
    pub contents: &'static [u8],
}

/// Output format used to render documentation pages.
///
/// Implementations only produce text; locations come from the
/// [`LocationProvider`] in the [`RenderContext`].
pub trait FormatService: Send + Sync {
    /// Output file extension including the dot (e.g. `.html`).
    fn extension(&self) -> &str;

    /// Append rendered `nodes` to `out`.
    fn append_nodes(&self, ctx: &RenderContext<'_>, out: &mut String, nodes: &[PageId]);

    /// Files to copy into the output tree.
    fn support_files(&self) -> Vec<SupportFile> {
        Vec::new()
    }
}

/// Render `nodes` to a new string.
pub fn format(service: &dyn FormatService, ctx: &RenderContext<'_>, nodes: &[PageId]) -> String {
    let mut out = String::new();
    service.append_nodes(ctx, &mut out, nodes);
    out
}
