//! Output formats for Locus.
//!
//! A [`FormatService`] turns pages into file contents, using a
//! [`LocationProvider`](locus_location::LocationProvider) for every link it
//! emits. Formats also declare [`SupportFile`]s (stylesheets and the like)
//! that must be copied next to the generated pages.
//!
//! Bundled formats:
//! - [`HtmlFormat`]: standalone HTML pages with a shared stylesheet
//! - [`MarkdownFormat`]: plain Markdown pages
//!
//! [`emit_site`] writes a whole page tree to an output directory.

mod emit;
mod html;
mod markdown;
mod service;

pub use emit::{EmitError, EmitSummary, emit_site};
pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use service::{FormatService, RenderContext, SupportFile, format};
