//! HTML output format.
//!
//! Produces one standalone HTML5 document per output file. Every document
//! links the shared stylesheet through the page's path to the output root.

use std::fmt::Write;

use locus_links::escape_html;
use locus_pages::PageId;

use crate::service::{FormatService, RenderContext, SupportFile, reference_label};

const STYLE_CSS: &[u8] = include_bytes!("../assets/style.css");

/// Stylesheet location relative to the output root.
const STYLE_PATH: &str = "style.css";

/// HTML output format.
pub struct HtmlFormat;

impl HtmlFormat {
    fn append_node(ctx: &RenderContext<'_>, node: PageId, out: &mut String) {
        let page = ctx.node(node);

        out.push_str("<section>");

        let ancestors = ctx.provider.ancestors(Some(node));
        if let [parents @ .., _] = ancestors.as_slice()
            && !parents.is_empty()
        {
            out.push_str(r#"<nav class="breadcrumbs">"#);
            for (i, &parent) in parents.iter().enumerate() {
                if i > 0 {
                    out.push_str(" / ");
                }
                write!(
                    out,
                    r#"<a href="{}">{}</a>"#,
                    escape_html(&ctx.link_to(parent)),
                    escape_html(&ctx.node(parent).name)
                )
                .unwrap();
            }
            out.push_str("</nav>");
        }

        write!(out, "<h1>{}</h1>", escape_html(&page.name)).unwrap();

        if let Some(reference) = &page.reference {
            write!(
                out,
                r#"<p><code class="reference">{}</code></p>"#,
                escape_html(&reference.to_string())
            )
            .unwrap();
        }

        if !page.links.is_empty() {
            out.push_str(r#"<h2>See also</h2><ul class="links">"#);
            for dri in &page.links {
                let label = escape_html(&reference_label(dri));
                match ctx.link_reference(dri).link() {
                    Some(href) => write!(
                        out,
                        r#"<li><a href="{}"><code>{label}</code></a></li>"#,
                        escape_html(href)
                    )
                    .unwrap(),
                    None => write!(out, "<li><code>{label}</code></li>").unwrap(),
                }
            }
            out.push_str("</ul>");
        }

        let children = ctx.provider.tree().children(node);
        if !children.is_empty() {
            out.push_str(r#"<ul class="children">"#);
            for &child in children {
                write!(
                    out,
                    r#"<li><a href="{}">{}</a></li>"#,
                    escape_html(&ctx.link_to(child)),
                    escape_html(&ctx.node(child).name)
                )
                .unwrap();
            }
            out.push_str("</ul>");
        }

        out.push_str("</section>");
    }
}

impl FormatService for HtmlFormat {
    fn extension(&self) -> &str {
        ".html"
    }

    fn append_nodes(&self, ctx: &RenderContext<'_>, out: &mut String, nodes: &[PageId]) {
        let title = nodes
            .first()
            .map(|&node| ctx.node(node).name.as_str())
            .unwrap_or_default();

        out.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\">");
        write!(out, "<title>{}</title>", escape_html(title)).unwrap();
        write!(
            out,
            r#"<link rel="stylesheet" href="{}{STYLE_PATH}">"#,
            escape_html(&ctx.root())
        )
        .unwrap();
        out.push_str("</head><body>");

        for &node in nodes {
            Self::append_node(ctx, node, out);
        }

        out.push_str("</body></html>");
    }

    fn support_files(&self) -> Vec<SupportFile> {
        vec![SupportFile {
            resource: "style.css",
            target_path: STYLE_PATH.to_owned(),
            contents: STYLE_CSS,
        }]
    }
}
