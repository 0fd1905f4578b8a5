//! HTML serialization.

use std::fmt::Write;

use super::{Document, NodeData, NodeId};

impl Document {
    /// Serialize the attached tree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.root()) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize one subtree as HTML.
    pub fn node_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Root => {
                for &child in &node.children {
                    self.write_node(child, out);
                }
            }
            NodeData::Text(text) => out.push_str(&escape(text)),
            NodeData::Element { tag, classes } => {
                out.push('<');
                out.push_str(tag);
                if !classes.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&classes.join(" ")));
                }
                out.push('>');
                for &child in &node.children {
                    self.write_node(child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
