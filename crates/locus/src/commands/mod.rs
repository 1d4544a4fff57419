//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod layout;
pub(crate) mod resolve;

pub(crate) use build::BuildArgs;
pub(crate) use layout::LayoutArgs;
pub(crate) use resolve::ResolveArgs;

use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use locus_config::{Config, OutputFormat};
use locus_format::{FormatService, HtmlFormat, MarkdownFormat};
use locus_location::DefaultLocationProvider;
use locus_pages::{PageId, PageManifest, PageTree};

use crate::error::CliError;

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FormatArg {
    Html,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => Self::Html,
            FormatArg::Markdown => Self::Markdown,
        }
    }
}

/// Format implementation for a configured output format.
pub(crate) fn format_service(format: OutputFormat) -> Box<dyn FormatService> {
    match format {
        OutputFormat::Html => Box::new(HtmlFormat),
        OutputFormat::Markdown => Box::new(MarkdownFormat),
    }
}

/// Read a JSON page manifest and build its tree.
pub(crate) fn load_tree(path: &Path) -> Result<PageTree, CliError> {
    let content = std::fs::read_to_string(path)?;
    let manifest: PageManifest = serde_json::from_str(&content)?;
    let tree = manifest.into_tree()?;
    tracing::info!(pages = tree.len(), path = %path.display(), "Loaded page tree");
    Ok(tree)
}

/// Location provider over `tree` using the configured passes and format.
pub(crate) fn provider_for(
    tree: PageTree,
    config: &Config,
    service: &dyn FormatService,
) -> DefaultLocationProvider {
    DefaultLocationProvider::new(Arc::new(tree), config.passes.clone(), service.extension())
}

/// Find a page by the `/`-separated names from the root (e.g. `core/pkg/Foo`).
pub(crate) fn find_page(tree: &PageTree, path: &str) -> Result<PageId, CliError> {
    let not_found = || CliError::Validation(format!("No page at '{path}'"));
    let mut names = path.split('/').filter(|name| !name.is_empty());

    let root = tree.root();
    if names.next() != Some(tree.node(root).name.as_str()) {
        return Err(not_found());
    }

    names.try_fold(root, |current, name| {
        tree.children(current)
            .iter()
            .copied()
            .find(|&child| tree.node(child).name == name)
            .ok_or_else(not_found)
    })
}

/// `/`-separated display names from the root to `page`.
pub(crate) fn page_path(tree: &PageTree, page: PageId) -> String {
    let mut names = vec![tree.node(page).name.as_str()];
    let mut current = page;
    while let Some(parent) = tree.parent(current) {
        names.push(tree.node(parent).name.as_str());
        current = parent;
    }
    names.reverse();
    names.join("/")
}
