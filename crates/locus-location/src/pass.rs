//! Per-platform external documentation registrations.

use locus_links::ExternalDocLink;
use locus_pages::PlatformData;
use serde::Deserialize;

/// Documentation pass: one compilation target and the external
/// documentation sets its references may link to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PassConfig {
    /// Compilation target of the pass.
    #[serde(flatten)]
    pub platform: PlatformData,
    /// External documentation sets, in lookup order.
    #[serde(default)]
    pub external_links: Vec<ExternalDocLink>,
}

impl PassConfig {
    /// Create a pass without external documentation.
    pub fn new(platform: PlatformData) -> Self {
        Self {
            platform,
            external_links: Vec::new(),
        }
    }

    /// Add an external documentation set.
    #[must_use]
    pub fn with_link(mut self, link: ExternalDocLink) -> Self {
        self.external_links.push(link);
        self
    }
}
