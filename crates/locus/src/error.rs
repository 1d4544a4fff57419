//! CLI error types.

use locus_config::ConfigError;
use locus_format::EmitError;
use locus_pages::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page tree: {0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Emit(#[from] EmitError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
