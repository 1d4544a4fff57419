//! `locus build` command implementation.

use std::path::PathBuf;

use clap::Args;
use locus_config::{CliSettings, Config};
use locus_format::emit_site;

use super::{FormatArg, format_service, load_tree, provider_for};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// JSON page tree produced by the extraction stage.
    #[arg(long)]
    pages: PathBuf,

    /// Path to configuration file (default: auto-discover locus.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output,
            format: self.format.map(Into::into),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let out_dir = &config.output_resolved.dir;

        output.info(&format!("Pages: {}", self.pages.display()));
        output.info(&format!("Output: {}", out_dir.display()));
        output.info(&format!("Format: {}", config.output_resolved.format));
        if config.passes.is_empty() {
            output.warning("No passes configured: external references will not be linked");
        }

        let service = format_service(config.output_resolved.format);
        let tree = load_tree(&self.pages)?;
        let provider = provider_for(tree, &config, service.as_ref());

        let summary = emit_site(out_dir, &provider, service.as_ref(), &config.platforms())?;

        output.success(&format!(
            "Wrote {} pages and {} support files",
            summary.pages, summary.support_files
        ));
        if summary.skipped > 0 {
            output.warning(&format!(
                "Skipped {} pages whose output location was already taken",
                summary.skipped
            ));
        }
        Ok(())
    }
}
