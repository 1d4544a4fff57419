//! `locus layout` command implementation.

use std::path::PathBuf;

use clap::Args;
use locus_config::{CliSettings, Config};
use locus_location::LocationProvider;

use super::{FormatArg, find_page, format_service, load_tree, page_path, provider_for};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the layout command.
#[derive(Args)]
pub(crate) struct LayoutArgs {
    /// JSON page tree produced by the extraction stage.
    #[arg(long)]
    pages: PathBuf,

    /// Path to configuration file (default: auto-discover locus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, which decides the file extension (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Print paths relative to this page (e.g. `core/com.example/Foo`).
    #[arg(long)]
    from: Option<String>,
}

impl LayoutArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            format: self.format.map(Into::into),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let service = format_service(config.output_resolved.format);

        let tree = load_tree(&self.pages)?;
        let context = self
            .from
            .as_deref()
            .map(|path| find_page(&tree, path))
            .transpose()?;
        let provider = provider_for(tree, &config, service.as_ref());
        let tree = provider.tree();

        for page in tree.preorder() {
            output.labeled(&page_path(tree, page), &provider.resolve_node(page, context));
        }

        Ok(())
    }
}
