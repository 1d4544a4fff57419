//! `locus resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use locus_config::{CliSettings, Config};
use locus_location::{LocationProvider, Resolution};
use locus_pages::CodeRef;

use super::{FormatArg, find_page, format_service, load_tree, provider_for};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// JSON page tree produced by the extraction stage.
    #[arg(long)]
    pages: PathBuf,

    /// Code reference as JSON (e.g. `{"package":"java.util","class_names":"List"}`).
    #[arg(long)]
    reference: String,

    /// Pass whose external documentation sets apply, as `MODULE` (all of
    /// the module's platforms) or `MODULE:PLATFORM` (e.g. `core:js`). Repeatable.
    #[arg(long = "platform", value_name = "MODULE[:PLATFORM]")]
    platforms: Vec<String>,

    /// Resolve relative to this page (e.g. `core/com.example/Foo`).
    #[arg(long)]
    from: Option<String>,

    /// Path to configuration file (default: auto-discover locus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, which decides the file extension (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

impl ResolveArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            format: self.format.map(Into::into),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let dri: CodeRef = serde_json::from_str(&self.reference)?;

        let mut platforms = Vec::new();
        for selector in &self.platforms {
            let passes = config.select_passes(selector);
            if passes.is_empty() {
                return Err(CliError::Validation(format!("No pass matches '{selector}'")));
            }
            platforms.extend(passes.into_iter().map(|pass| pass.platform.clone()));
        }

        let service = format_service(config.output_resolved.format);
        let tree = load_tree(&self.pages)?;
        let context = self
            .from
            .as_deref()
            .map(|path| find_page(&tree, path))
            .transpose()?;
        let provider = provider_for(tree, &config, service.as_ref());

        match provider.resolve_reference(&dri, &platforms, context) {
            Resolution::Local(path) => output.labeled("local", &path),
            Resolution::External(url) => output.labeled("external", &url),
            Resolution::Unresolved => output.warning(&format!("unresolved: {dri}")),
        }

        Ok(())
    }
}
