//! Nested serde representation of a page tree.

use serde::{Deserialize, Serialize};

use crate::reference::CodeRef;
use crate::tree::{PageId, PageKind, PageTree, PageTreeBuilder, TreeError};

/// Page tree as produced by the model-extraction stage.
///
/// The manifest nests children inside their parent, which is convenient to
/// write by hand or to exchange as JSON. Convert it to the arena form with
/// [`PageManifest::into_tree`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageManifest {
    /// Display name.
    pub name: String,
    /// Page kind.
    #[serde(default)]
    pub kind: PageKind,
    /// Code element documented by this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<CodeRef>,
    /// Code elements the page refers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<CodeRef>,
    /// Child pages in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageManifest>,
}

impl PageManifest {
    /// Build the arena tree rooted at this manifest.
    pub fn into_tree(self) -> Result<PageTree, TreeError> {
        fn attach(
            builder: &mut PageTreeBuilder,
            id: PageId,
            links: Vec<CodeRef>,
            children: Vec<PageManifest>,
        ) {
            for link in links {
                builder.add_link(id, link);
            }
            for child in children {
                let child_id = builder.add_child(id, child.name, child.kind, child.reference);
                attach(builder, child_id, child.links, child.children);
            }
        }

        let mut builder = PageTreeBuilder::new();
        let root = builder.add_root(self.name, self.kind, self.reference);
        attach(&mut builder, root, self.links, self.children);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_tree_preserves_order_and_nesting() {
        let json = r#"{
            "name": "core",
            "kind": "module",
            "children": [
                {
                    "name": "com.example",
                    "kind": "package",
                    "reference": {"package": "com.example"},
                    "children": [
                        {"name": "Foo", "kind": "classlike", "reference": {"package": "com.example", "class_names": "Foo"}},
                        {"name": "Bar", "kind": "classlike", "links": [{"package": "java.util", "class_names": "List"}]}
                    ]
                }
            ]
        }"#;
        let manifest: PageManifest = serde_json::from_str(json).unwrap();

        let tree = manifest.into_tree().unwrap();

        let root = tree.root();
        assert_eq!(tree.node(root).kind, PageKind::Module);
        let [package] = tree.children(root) else {
            panic!("expected one package");
        };
        let names: Vec<&str> = tree
            .children(*package)
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["Foo", "Bar"]);
        let bar = tree.node(tree.children(*package)[1]);
        assert_eq!(bar.kind, PageKind::Other);
        assert_eq!(bar.links, vec![CodeRef::class("java.util", "List")]);
        assert!(tree.node(root).links.is_empty());
    }
}
