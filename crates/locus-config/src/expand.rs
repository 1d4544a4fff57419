//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a bare `$` in a URL
/// survives. An unset variable without a default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var_with_path_suffix() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LOCUS_TEST_DOCS_HOST", "docs.example.org");
        }

        let result = expand_env("https://${LOCUS_TEST_DOCS_HOST}/api", "test.url").unwrap();

        assert_eq!(result, "https://docs.example.org/api");
        unsafe {
            std::env::remove_var("LOCUS_TEST_DOCS_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LOCUS_TEST_UNSET_DIR");
        }

        let result = expand_env("${LOCUS_TEST_UNSET_DIR:-build/docs}", "output.dir").unwrap();

        assert_eq!(result, "build/docs");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LOCUS_TEST_MISSING");
        }

        let err = expand_env("${LOCUS_TEST_MISSING}", "output.dir").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in output.dir: ${LOCUS_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("https://example.org/$path", "test.url").unwrap();

        assert_eq!(result, "https://example.org/$path");
    }
}
