//! Filename sanitizing and external documentation links for Locus.
//!
//! - [`identifier_to_filename`]: case-fold-injective filesystem segments
//! - [`javadoc_location`] / [`native_location`]: URL conventions of external
//!   documentation sets
//! - [`ExternalDocLink`]: a registered external documentation set
//!
//! # Example
//!
//! ```
//! use locus_links::identifier_to_filename;
//!
//! assert_eq!(identifier_to_filename("FooBar"), "-foo-bar");
//! assert_eq!(identifier_to_filename("fooBar"), "foo-bar");
//! assert_eq!(identifier_to_filename("index"), "--index--");
//! ```

mod escape;
mod external;
mod filename;

pub use escape::escape_html;
pub use external::{
    ExternalDocLink, LinkConvention, PackageScope, javadoc_location, native_location,
    resolve_external,
};
pub use filename::{RESERVED_FILENAMES, ROOT_FILENAME, identifier_to_filename};
