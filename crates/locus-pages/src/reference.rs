//! Structured code references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Callable part of a [`CodeRef`]: a function name and its parameter types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Callable {
    /// Function or property name.
    pub name: String,
    /// Parameter type names in declaration order.
    #[serde(default)]
    pub params: Vec<String>,
}

impl Callable {
    /// Create a callable descriptor.
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reference to a documented program element.
///
/// Identifies a package, a (possibly nested) class, or a callable inside a
/// class. References are used as cross-link targets and are compared by all
/// three components.
///
/// A callable is only meaningful together with a class path; that is a
/// precondition of whoever builds the reference and is not checked here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeRef {
    /// Dot-separated package name. `None` for the default package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Dot-separated class path, outer to inner (e.g. `Outer.Inner`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_names: Option<String>,
    /// Callable inside the class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callable: Option<Callable>,
}

impl CodeRef {
    /// Reference to a package.
    pub fn package(package: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            ..Self::default()
        }
    }

    /// Reference to a class inside a package.
    pub fn class(package: impl Into<String>, class_names: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            class_names: Some(class_names.into()),
            callable: None,
        }
    }

    /// Return a copy of this reference pointing at a callable.
    #[must_use]
    pub fn with_callable(mut self, callable: Callable) -> Self {
        self.callable = Some(callable);
        self
    }

    /// Class path split into its nested segments.
    pub fn class_segments(&self) -> impl Iterator<Item = &str> {
        self.class_names.iter().flat_map(|names| names.split('.'))
    }
}

impl fmt::Display for CodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package.as_deref().unwrap_or(""))?;
        f.write_str("/")?;
        f.write_str(self.class_names.as_deref().unwrap_or(""))?;
        f.write_str("/")?;
        if let Some(callable) = &self.callable {
            write!(f, "{}({})", callable.name, callable.params.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_references_compare_all_components() {
        let a = CodeRef::class("com.example", "Foo");
        let b = CodeRef::class("com.example", "Foo");
        let c = CodeRef::class("com.example", "Foo").with_callable(Callable::new("bar", ["Int"]));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_class_segments_split_nested_path() {
        let dri = CodeRef::class("pkg", "Outer.Inner");

        let segments: Vec<&str> = dri.class_segments().collect();

        assert_eq!(segments, vec!["Outer", "Inner"]);
    }

    #[test]
    fn test_class_segments_empty_without_class() {
        let dri = CodeRef::package("pkg");

        assert_eq!(dri.class_segments().count(), 0);
    }

    #[test]
    fn test_display_includes_callable() {
        let dri = CodeRef::class("com.example", "Foo")
            .with_callable(Callable::new("bar", ["String", "Int"]));

        assert_eq!(dri.to_string(), "com.example/Foo/bar(String,Int)");
    }

    #[test]
    fn test_display_default_package() {
        let dri = CodeRef {
            class_names: Some("Foo".to_owned()),
            ..CodeRef::default()
        };

        assert_eq!(dri.to_string(), "/Foo/");
    }

    #[test]
    fn test_deserialize_omits_missing_parts() {
        let dri: CodeRef = serde_json::from_str(r#"{"package":"a.b"}"#).unwrap();

        assert_eq!(dri, CodeRef::package("a.b"));
    }
}
