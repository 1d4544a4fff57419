//! Writing a rendered page tree to disk.
//!
//! Pages are rendered in parallel; the location provider's caches are shared
//! by all workers.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use locus_location::LocationProvider;
use locus_pages::{PageId, PlatformData};
use rayon::prelude::*;

use crate::service::{FormatService, RenderContext, format};

/// Error returned when emitting a site fails.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Writing an output file or directory failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Counts of files written by [`emit_site`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    /// Rendered pages.
    pub pages: usize,
    /// Copied support files.
    pub support_files: usize,
    /// Pages not written because an earlier page (in pre-order) already
    /// took their location.
    pub skipped: usize,
}

/// Render every page of the provider's tree into `out_dir`.
///
/// Each page is written to its context-free location
/// (`provider.resolve_node(page, None)`), followed by the format's support
/// files. The provider must use the format's extension.
///
/// Pages whose names sanitize to the same location (overloads, for example)
/// would overwrite each other; the first in pre-order is written and the
/// rest are skipped with a warning.
///
/// # Arguments
///
/// * `out_dir` - Output root directory (created if missing)
/// * `provider` - Location provider for the page tree
/// * `format` - Output format
/// * `platforms` - Platforms used to resolve external references
pub fn emit_site(
    out_dir: &Path,
    provider: &dyn LocationProvider,
    format: &dyn FormatService,
    platforms: &[PlatformData],
) -> Result<EmitSummary, EmitError> {
    let (pages, skipped) = claim_locations(provider);

    pages
        .par_iter()
        .map(|(page, location)| emit_page(out_dir, provider, format, platforms, *page, location))
        .collect::<Result<Vec<()>, EmitError>>()?;

    let support_files = format.support_files();
    for file in &support_files {
        let path = out_dir.join(&file.target_path);
        write_file(&path, file.contents)?;
        tracing::debug!(resource = file.resource, path = %path.display(), "Copied support file");
    }

    let summary = EmitSummary {
        pages: pages.len(),
        support_files: support_files.len(),
        skipped,
    };
    tracing::info!(
        pages = summary.pages,
        support_files = summary.support_files,
        skipped = summary.skipped,
        out_dir = %out_dir.display(),
        "Site emitted"
    );
    Ok(summary)
}

/// Assign output locations in pre-order; the first page to reach a location
/// keeps it.
fn claim_locations(provider: &dyn LocationProvider) -> (Vec<(PageId, String)>, usize) {
    let mut owners: HashMap<String, PageId> = HashMap::new();
    let mut pages = Vec::new();
    let mut skipped = 0;

    for page in provider.tree().preorder() {
        match owners.entry(provider.resolve_node(page, None)) {
            Entry::Vacant(entry) => {
                pages.push((page, entry.key().clone()));
                entry.insert(page);
            }
            Entry::Occupied(entry) => {
                tracing::warn!(
                    page = %page,
                    kept = %entry.get(),
                    path = %entry.key(),
                    "Page location already taken, page not written"
                );
                skipped += 1;
            }
        }
    }

    (pages, skipped)
}

fn emit_page(
    out_dir: &Path,
    provider: &dyn LocationProvider,
    service: &dyn FormatService,
    platforms: &[PlatformData],
    page: PageId,
    location: &str,
) -> Result<(), EmitError> {
    let path = out_dir.join(location);
    let ctx = RenderContext::new(provider, page, platforms);
    let content = format(service, &ctx, &[page]);

    write_file(&path, content.as_bytes())?;
    tracing::trace!(page = %page, path = %path.display(), "Wrote page");
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), EmitError> {
    let to_error = |source: io::Error| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(to_error)
}
