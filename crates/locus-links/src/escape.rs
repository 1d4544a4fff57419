//! HTML escaping.

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use locus_links::escape_html;
///
/// assert_eq!(escape_html("List<String>"), "List&lt;String&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            c => result.push(c),
        }
    }
    result
}
