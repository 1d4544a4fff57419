//! Outcome of resolving a cross-reference.

/// Result of resolving a [`CodeRef`](locus_pages::CodeRef).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Page in the local tree; path relative to the viewing page.
    Local(String),
    /// Page in an external documentation set; absolute URL.
    External(String),
    /// No local page and no covering external documentation set.
    ///
    /// Render the reference as plain text.
    Unresolved,
}

impl Resolution {
    /// Link target, or `None` if the reference must be rendered unlinked.
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Local(path) => Some(path),
            Self::External(url) => Some(url),
            Self::Unresolved => None,
        }
    }

    /// Consume the resolution and return the link target.
    pub fn into_link(self) -> Option<String> {
        match self {
            Self::Local(link) | Self::External(link) => Some(link),
            Self::Unresolved => None,
        }
    }

    /// Check if the target is part of the local tree.
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Check if the target is hosted externally.
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Check if the reference has any link target.
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}
