//! Compilation target descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform kind of a compilation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// JVM bytecode.
    Jvm,
    /// JavaScript.
    Js,
    /// Native binaries.
    Native,
    /// Platform-independent common code.
    Common,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jvm => "jvm",
            Self::Js => "js",
            Self::Native => "native",
            Self::Common => "common",
        };
        f.write_str(name)
    }
}

/// Compilation target a page or reference belongs to.
///
/// Used to select which external documentation registrations apply when a
/// reference is not part of the local page tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformData {
    /// Module name.
    pub module_name: String,
    /// Platform kind.
    pub platform: Platform,
    /// Target names (e.g. `jvm`, `linuxX64`).
    #[serde(default)]
    pub targets: Vec<String>,
}

impl PlatformData {
    /// Create a platform descriptor.
    pub fn new<I, S>(module_name: impl Into<String>, platform: Platform, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module_name: module_name.into(),
            platform,
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_data_equality_includes_targets() {
        let a = PlatformData::new("core", Platform::Jvm, ["jvm"]);
        let b = PlatformData::new("core", Platform::Jvm, ["jvm"]);
        let c = PlatformData::new("core", Platform::Jvm, ["android"]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_platform_deserializes_lowercase() {
        let data: PlatformData =
            serde_json::from_str(r#"{"module_name":"core","platform":"native"}"#).unwrap();

        assert_eq!(data.platform, Platform::Native);
        assert!(data.targets.is_empty());
        assert_eq!(data.platform.to_string(), "native");
    }
}
