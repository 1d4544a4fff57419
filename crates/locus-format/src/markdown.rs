//! Markdown output format.

use std::fmt::Write;

use locus_pages::PageId;

use crate::service::{FormatService, RenderContext, reference_label};

/// Markdown output format.
pub struct MarkdownFormat;

/// Escape characters that would end link text early.
fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

impl FormatService for MarkdownFormat {
    fn extension(&self) -> &str {
        ".md"
    }

    fn append_nodes(&self, ctx: &RenderContext<'_>, out: &mut String, nodes: &[PageId]) {
        for &node in nodes {
            let page = ctx.node(node);

            let ancestors = ctx.provider.ancestors(Some(node));
            if let [parents @ .., _] = ancestors.as_slice()
                && !parents.is_empty()
            {
                let crumbs: Vec<String> = parents
                    .iter()
                    .map(|&parent| {
                        format!(
                            "[{}]({})",
                            escape_link_text(&ctx.node(parent).name),
                            ctx.link_to(parent)
                        )
                    })
                    .collect();
                writeln!(out, "{}\n", crumbs.join(" / ")).unwrap();
            }

            writeln!(out, "# {}\n", page.name).unwrap();

            if let Some(reference) = &page.reference {
                writeln!(out, "`{reference}`\n").unwrap();
            }

            if !page.links.is_empty() {
                writeln!(out, "## See also\n").unwrap();
                for dri in &page.links {
                    let label = reference_label(dri);
                    match ctx.link_reference(dri).link() {
                        Some(target) => writeln!(out, "- [`{label}`]({target})").unwrap(),
                        None => writeln!(out, "- `{label}`").unwrap(),
                    }
                }
                writeln!(out).unwrap();
            }

            for &child in ctx.provider.tree().children(node) {
                writeln!(
                    out,
                    "- [{}]({})",
                    escape_link_text(&ctx.node(child).name),
                    ctx.link_to(child)
                )
                .unwrap();
            }
        }
    }
}
