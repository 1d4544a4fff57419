//! Configuration management for Locus.
//!
//! Parses `locus.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `output.dir`
//! - `passes[*].external_links[*].url`

mod expand;

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use locus_links::LinkConvention;
use locus_location::PassConfig;
use locus_pages::PlatformData;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "locus.toml";

/// Output directory used when the config does not name one.
const DEFAULT_OUTPUT_DIR: &str = "build/docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration (directory is a relative string from TOML).
    output: OutputConfigRaw,
    /// Documentation passes, one per compilation target.
    pub passes: Vec<PassConfig>,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Output format of the generated site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML pages with a shared stylesheet.
    #[default]
    Html,
    /// Markdown pages.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
        })
    }
}

/// Raw output configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    format: Option<OutputFormat>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default)]
pub struct OutputConfig {
    /// Directory the site is written to.
    pub dir: PathBuf,
    /// Output format.
    pub format: OutputFormat,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`passes[0].external_links[1].url`").
        field: String,
        /// Error message (e.g., "${`DOCS_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `locus.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Platforms of all configured passes, in declaration order.
    #[must_use]
    pub fn platforms(&self) -> Vec<PlatformData> {
        self.passes.iter().map(|pass| pass.platform.clone()).collect()
    }

    /// Passes matching `selector`, in configuration order.
    ///
    /// The selector is either `MODULE`, matching every pass of the module,
    /// or `MODULE:PLATFORM` (e.g. `core:js`), matching only the pass for that
    /// platform kind.
    #[must_use]
    pub fn select_passes(&self, selector: &str) -> Vec<&PassConfig> {
        let (module_name, platform) = match selector.split_once(':') {
            Some((module_name, platform)) => (module_name, Some(platform)),
            None => (selector, None),
        };

        self.passes
            .iter()
            .filter(|pass| pass.platform.module_name == module_name)
            .filter(|pass| platform.is_none_or(|p| pass.platform.platform.to_string() == p))
            .collect()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(format) = settings.format {
            self.output_resolved.format = format;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            output: OutputConfigRaw::default(),
            passes: Vec::new(),
            output_resolved: OutputConfig {
                dir: base.join(DEFAULT_OUTPUT_DIR),
                format: OutputFormat::default(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for (i, pass) in self.passes.iter().enumerate() {
            require_non_empty(
                &pass.platform.module_name,
                &format!("passes[{i}].module_name"),
            )?;
            if !seen.insert(&pass.platform) {
                return Err(ConfigError::Validation(format!(
                    "passes[{i}] duplicates the platform of an earlier pass ({})",
                    pass.platform.module_name
                )));
            }
            Self::validate_links(i, pass)?;
        }

        Ok(())
    }

    /// Validate the external documentation sets of one pass.
    fn validate_links(index: usize, pass: &PassConfig) -> Result<(), ConfigError> {
        for (j, link) in pass.external_links.iter().enumerate() {
            let field = format!("passes[{index}].external_links[{j}]");
            require_non_empty(&link.url, &format!("{field}.url"))?;
            require_http_url(&link.url, &format!("{field}.url"))?;

            if let LinkConvention::Native { extension } = &link.convention
                && !extension.starts_with('.')
            {
                return Err(ConfigError::Validation(format!(
                    "{field}.extension must start with '.'"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }

        for (i, pass) in self.passes.iter_mut().enumerate() {
            for (j, link) in pass.external_links.iter_mut().enumerate() {
                link.url =
                    expand::expand_env(&link.url, &format!("passes[{i}].external_links[{j}].url"))?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: config_dir.join(self.output.dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
            format: self.output.format.unwrap_or_default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use locus_links::PackageScope;
    use locus_pages::Platform;
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_CONFIG: &str = r#"
[output]
dir = "site"
format = "markdown"

[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes.external_links]]
url = "https://docs.oracle.com/javase/8/docs/api"
packages = ["java", "javax"]
convention = "javadoc"
jdk_version = 8

[[passes.external_links]]
url = "https://example.org/stdlib"
convention = "native"

[[passes]]
module_name = "web"
platform = "js"
targets = ["js"]
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/build/docs"));
        assert_eq!(config.output_resolved.format, OutputFormat::Html);
        assert!(config.passes.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.passes.is_empty());
        assert!(config.output.dir.is_none());
    }

    #[test]
    fn test_parse_passes() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();

        assert_eq!(config.passes.len(), 2);
        assert_eq!(
            config.platforms(),
            vec![
                PlatformData::new("core", Platform::Jvm, ["jvm"]),
                PlatformData::new("web", Platform::Js, ["js"]),
            ]
        );

        let core = config.select_passes("core")[0];
        assert_eq!(core.external_links.len(), 2);
        assert_eq!(
            core.external_links[0].convention,
            LinkConvention::Javadoc { jdk_version: 8 }
        );
        assert_eq!(
            core.external_links[0].packages,
            PackageScope::Prefixes(vec!["java".to_owned(), "javax".to_owned()])
        );
        assert_eq!(
            core.external_links[1].convention,
            LinkConvention::Native {
                extension: ".html".to_owned()
            }
        );
        assert_eq!(core.external_links[1].packages, PackageScope::All);
        assert!(config.select_passes("missing").is_empty());
    }

    #[test]
    fn test_select_passes_distinguishes_platforms_of_one_module() {
        let toml = r#"
[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes]]
module_name = "core"
platform = "js"
targets = ["js"]

[[passes.external_links]]
url = "https://docs.example/js"
convention = "native"
extension = ".html"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        config.validate().unwrap();

        let js = config.select_passes("core:js");
        assert_eq!(js.len(), 1);
        assert_eq!(js[0].platform, PlatformData::new("core", Platform::Js, ["js"]));
        assert_eq!(js[0].external_links.len(), 1);

        let jvm = config.select_passes("core:jvm");
        assert_eq!(jvm.len(), 1);
        assert!(jvm[0].external_links.is_empty());

        let all: Vec<_> = config
            .select_passes("core")
            .into_iter()
            .map(|pass| pass.platform.platform)
            .collect();
        assert_eq!(all, vec![Platform::Jvm, Platform::Js]);

        assert!(config.select_passes("core:native").is_empty());
    }

    #[test]
    fn test_javadoc_without_version_is_parse_error() {
        let toml = r#"
[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes.external_links]]
url = "https://docs.oracle.com/javase/8/docs/api"
convention = "javadoc"
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let mut config: Config = toml::from_str(FULL_CONFIG).unwrap();

        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/site"));
        assert_eq!(config.output_resolved.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();

        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.output_resolved.dir, PathBuf::from("/project/build/docs"));
        assert_eq!(config.output_resolved.format, OutputFormat::Html);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            output_dir: Some(PathBuf::from("/custom/out")),
            format: Some(OutputFormat::Markdown),
        };

        config.apply_cli_settings(&settings);

        assert_eq!(config.output_resolved.dir, PathBuf::from("/custom/out"));
        assert_eq!(config.output_resolved.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.output_resolved.dir, PathBuf::from("/test/build/docs"));
        assert_eq!(config.output_resolved.format, OutputFormat::Html);
    }

    #[test]
    fn test_expand_env_vars_link_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LOCUS_TEST_JDK_DOCS", "https://jdk.example.org");
        }

        let toml = r#"
[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes.external_links]]
url = "${LOCUS_TEST_JDK_DOCS}/api"
convention = "javadoc"
jdk_version = 11
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.passes[0].external_links[0].url,
            "https://jdk.example.org/api"
        );

        unsafe {
            std::env::remove_var("LOCUS_TEST_JDK_DOCS");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_output_dir_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LOCUS_TEST_MISSING_OUT");
        }

        let toml = r#"
[output]
dir = "${LOCUS_TEST_MISSING_OUT}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("output.dir"));
    }

    #[test]
    fn test_validate_full_config_passes() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_module_name() {
        let toml = r#"
[[passes]]
module_name = ""
platform = "jvm"
targets = []
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: passes[0].module_name cannot be empty"
        );
    }

    #[test]
    fn test_validate_duplicate_platform() {
        let toml = r#"
[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("passes[1]"));
    }

    #[test]
    fn test_validate_link_url_scheme() {
        let toml = r#"
[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes.external_links]]
url = "ftp://docs.example.org"
convention = "native"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: passes[0].external_links[0].url must start with http:// or https://"
        );
    }

    #[test]
    fn test_validate_native_extension_dot() {
        let toml = r#"
[[passes]]
module_name = "core"
platform = "jvm"
targets = ["jvm"]

[[passes.external_links]]
url = "https://docs.example.org"
convention = "native"
extension = "html"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("extension must start with '.'"));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL_CONFIG).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.output_resolved.dir, temp_dir.path().join("site"));
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.passes.len(), 2);
    }

    #[test]
    fn test_load_applies_cli_settings_after_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, FULL_CONFIG).unwrap();
        let settings = CliSettings {
            output_dir: None,
            format: Some(OutputFormat::Html),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.output_resolved.format, OutputFormat::Html);
        assert_eq!(config.output_resolved.dir, temp_dir.path().join("site"));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Html.to_string(), "html");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }
}
