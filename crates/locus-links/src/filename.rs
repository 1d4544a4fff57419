//! Filesystem-safe path segments for display identifiers.

/// Segment used for an empty identifier (the synthetic root of a page graph).
pub const ROOT_FILENAME: &str = "--root--";

/// Names that must never be emitted as plain segments: the index page
/// convention plus legacy device names reserved by Windows and DOS.
pub const RESERVED_FILENAMES: [&str; 9] =
    ["index", "con", "aux", "lst", "prn", "nul", "eof", "inp", "out"];

/// Map a display identifier to a path segment.
///
/// Generic brackets become dashes, and every uppercase letter becomes a dash
/// followed by its lowercase form. The result is lowercase, so it is safe on
/// case-insensitive filesystems, yet identifiers differing only in letter case
/// still map to different segments (`FooBar` -> `-foo-bar`,
/// `fooBar` -> `foo-bar`).
///
/// Identifiers equal to a reserved name (ignoring case) are wrapped in double
/// dashes: `index` -> `--index--`, `Index` -> `---index--`.
///
/// The mapping is injective over identifiers without dashes. An input that
/// already spells a wrapped form (`--index--`) maps to the same segment as
/// the reserved name itself.
///
/// # Examples
///
/// ```
/// use locus_links::identifier_to_filename;
///
/// assert_eq!(identifier_to_filename(""), "--root--");
/// assert_eq!(identifier_to_filename("List<String>"), "-list---string-");
/// assert_eq!(identifier_to_filename("Index"), "---index--");
/// ```
pub fn identifier_to_filename(name: &str) -> String {
    if name.is_empty() {
        return ROOT_FILENAME.to_owned();
    }

    let mut segment = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        match c {
            '<' | '>' => segment.push('-'),
            c if c.is_uppercase() => {
                segment.push('-');
                segment.extend(c.to_lowercase());
            }
            c => segment.push(c),
        }
    }

    if is_reserved(name) {
        format!("--{segment}--")
    } else {
        segment
    }
}

fn is_reserved(name: &str) -> bool {
    RESERVED_FILENAMES
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}
