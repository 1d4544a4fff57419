//! External documentation link conventions.
//!
//! References that are not part of the local page tree are linked to
//! externally hosted documentation sets. Two URL conventions are supported:
//!
//! - **Javadoc**: `com/example/Foo.html#bar(String, Int)`, with the parameter
//!   list punctuation depending on the JDK version that produced the docs
//! - **Native**: the layout produced by this generator,
//!   `com.example/-foo/bar.html`
//!
//! Both are pure string builders. Nothing here checks that the target exists.

use locus_pages::CodeRef;
use serde::Deserialize;

use crate::escape::escape_html;
use crate::filename::identifier_to_filename;

/// Build a Javadoc-style location for a reference.
///
/// # Examples
///
/// ```
/// use locus_pages::{Callable, CodeRef};
/// use locus_links::javadoc_location;
///
/// let dri = CodeRef::class("com.example", "Foo")
///     .with_callable(Callable::new("bar", ["String", "Int"]));
/// assert_eq!(javadoc_location(&dri, 7), "com/example/Foo.html#bar(String, Int)");
/// assert_eq!(javadoc_location(&dri, 8), "com/example/Foo.html#bar-String-Int-");
/// assert_eq!(javadoc_location(&dri, 11), "com/example/Foo.html#bar(String,Int)");
/// ```
pub fn javadoc_location(dri: &CodeRef, jdk_version: u32) -> String {
    let package_link = dri.package.as_ref().map(|package| package.replace('.', "/"));

    let Some(class_names) = &dri.class_names else {
        let link = match package_link {
            Some(package_link) => format!("{package_link}/package-summary.html"),
            None => "package-summary.html".to_owned(),
        };
        return escape_html(&link);
    };

    let class_link = match package_link {
        Some(package_link) => format!("{package_link}/{class_names}.html"),
        None => format!("{class_names}.html"),
    };

    let Some(callable) = &dri.callable else {
        return escape_html(&class_link);
    };

    let params = if jdk_version < 8 {
        format!("({})", callable.params.join(", "))
    } else if jdk_version < 10 {
        format!("-{}-", callable.params.join("-"))
    } else {
        format!("({})", callable.params.join(","))
    };

    escape_html(&format!("{class_link}#{}{params}", callable.name))
}

/// Build a location in this generator's own layout for a reference.
///
/// Class segments and callable names are sanitized with
/// [`identifier_to_filename`]; the package name is kept as one directory.
///
/// # Examples
///
/// ```
/// use locus_pages::CodeRef;
/// use locus_links::native_location;
///
/// assert_eq!(native_location(&CodeRef::package("com.example"), ".html"), "com.example/index.html");
/// assert_eq!(native_location(&CodeRef::class("com.example", "Foo"), ".html"), "com.example/-foo/index.html");
/// ```
pub fn native_location(dri: &CodeRef, extension: &str) -> String {
    if dri.class_names.is_none() {
        return match &dri.package {
            Some(package) => format!("{package}/index{extension}"),
            None => format!("index{extension}"),
        };
    }

    let mut class_link = match &dri.package {
        Some(package) => format!("{package}/"),
        None => String::new(),
    };
    let segments: Vec<String> = dri.class_segments().map(identifier_to_filename).collect();
    class_link.push_str(&segments.join("/"));

    match &dri.callable {
        Some(callable) => format!(
            "{class_link}/{}{extension}",
            identifier_to_filename(&callable.name)
        ),
        None => format!("{class_link}/index{extension}"),
    }
}

/// URL convention of an external documentation set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(tag = "convention", rename_all = "lowercase")]
pub enum LinkConvention {
    /// Javadoc output of the given JDK version.
    Javadoc {
        /// JDK version that generated the documentation.
        jdk_version: u32,
    },
    /// Documentation produced by this generator.
    Native {
        /// Output file extension, including the dot.
        #[serde(default = "default_extension")]
        extension: String,
    },
}

fn default_extension() -> String {
    ".html".to_owned()
}

/// Packages an external documentation set covers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<Vec<String>>")]
pub enum PackageScope {
    /// Every reference, including ones in the default package.
    #[default]
    All,
    /// Packages equal to, or nested under, one of the prefixes.
    Prefixes(Vec<String>),
}

impl From<Option<Vec<String>>> for PackageScope {
    fn from(prefixes: Option<Vec<String>>) -> Self {
        prefixes.map_or(Self::All, Self::Prefixes)
    }
}

impl PackageScope {
    /// Whether a reference in `package` belongs to this scope.
    pub fn covers(&self, package: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Prefixes(prefixes) => package.is_some_and(|package| {
                prefixes.iter().any(|prefix| {
                    package
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
                })
            }),
        }
    }
}

/// Registered external documentation set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ExternalDocLink {
    /// Base URL of the documentation set.
    pub url: String,
    /// Packages documented by this set.
    #[serde(default)]
    pub packages: PackageScope,
    /// URL convention used by this set.
    #[serde(flatten)]
    pub convention: LinkConvention,
}

impl ExternalDocLink {
    /// Create a registration covering all packages.
    pub fn new(url: impl Into<String>, convention: LinkConvention) -> Self {
        Self {
            url: url.into(),
            packages: PackageScope::All,
            convention,
        }
    }

    /// Restrict the registration to the given package prefixes.
    #[must_use]
    pub fn with_packages<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages = PackageScope::Prefixes(prefixes.into_iter().map(Into::into).collect());
        self
    }

    /// Absolute URL of `dri` in this documentation set.
    ///
    /// Returns `None` if the set does not cover the reference's package.
    pub fn location(&self, dri: &CodeRef) -> Option<String> {
        if !self.packages.covers(dri.package.as_deref()) {
            return None;
        }

        let path = match &self.convention {
            LinkConvention::Javadoc { jdk_version } => javadoc_location(dri, *jdk_version),
            LinkConvention::Native { extension } => native_location(dri, extension),
        };
        Some(format!("{}/{path}", self.url.trim_end_matches('/')))
    }
}

/// Resolve a reference against registrations in order; the first covering
/// set wins.
pub fn resolve_external<'a, I>(dri: &CodeRef, links: I) -> Option<String>
where
    I: IntoIterator<Item = &'a ExternalDocLink>,
{
    links.into_iter().find_map(|link| link.location(dri))
}
