//! Arena-backed document tree.
//!
//! A small stand-in for a rendered host document: elements with classes and
//! text leaves, addressed by [`NodeId`]. Nodes are never freed; a replaced
//! node simply becomes detached.

mod render;

use serde::Serialize;

use crate::error::{Error, Result};

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Document root.
    Root,
    /// Element with tag name and classes.
    Element {
        /// Lowercase tag name (e.g. `"blockquote"`).
        tag: String,
        /// Class list.
        classes: Vec<String>,
    },
    /// Text content.
    Text(String),
}

/// A node and its links.
#[derive(Debug, Clone)]
pub struct Node {
    /// Payload.
    pub data: NodeData,
    /// Parent, `None` for the root and detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

impl Node {
    const fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only a root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Root)],
            root: NodeId(0),
        }
    }

    /// Build a document with one `<p>` per blank-line separated paragraph.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root();
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.lines().chain(std::iter::once("")) {
            if line.trim().is_empty() {
                if !paragraph.is_empty() {
                    let p = doc.create_element("p", &[]);
                    let t = doc.create_text(paragraph.join("\n"));
                    doc.attach(p, t);
                    doc.attach(root, p);
                    paragraph.clear();
                }
            } else {
                paragraph.push(line);
            }
        }

        doc
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// The root node.
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of allocated nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        self.alloc(NodeData::Element {
            tag: tag.to_string(),
            classes: classes.iter().map(ToString::to_string).collect(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child {
            return Err(Error::Document(format!("cannot append {child:?} to itself")));
        }
        match self.get(child) {
            None => return Err(Error::Document(format!("unknown node {child:?}"))),
            Some(node) if node.parent.is_some() || child == self.root => {
                return Err(Error::Document(format!("node {child:?} is already attached")));
            }
            Some(_) => {}
        }
        match self.get(parent).map(|n| &n.data) {
            None => Err(Error::Document(format!("unknown node {parent:?}"))),
            Some(NodeData::Text(_)) => {
                Err(Error::Document(format!("text node {parent:?} cannot have children")))
            }
            Some(_) => {
                self.attach(parent, child);
                Ok(())
            }
        }
    }

    /// Link two known nodes without validation.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Tag name of an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => Some(tag),
            _ => None,
        }
    }

    /// Concatenated text of a subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Whether a node is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.get(node).and_then(|n| n.parent);
        }
        false
    }

    /// A subtree in document order, starting with `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            // Push children in reverse order for left-to-right traversal
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    /// Every attached text node in document order.
    pub fn text_nodes(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.text(id).is_some())
            .collect()
    }

    /// Replace `target` with a sequence of detached nodes, in order.
    ///
    /// `target` ends up detached. An empty sequence simply removes it.
    pub fn replace_with(&mut self, target: NodeId, replacements: &[NodeId]) -> Result<()> {
        let parent = self
            .get(target)
            .ok_or_else(|| Error::Document(format!("unknown node {target:?}")))?
            .parent
            .ok_or_else(|| Error::Document(format!("node {target:?} is not attached")))?;

        for &node in replacements {
            match self.get(node) {
                None => return Err(Error::Document(format!("unknown node {node:?}"))),
                Some(n) if n.parent.is_some() || node == self.root => {
                    return Err(Error::Document(format!("node {node:?} is already attached")));
                }
                Some(_) => {}
            }
        }

        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == target)
            .ok_or_else(|| Error::Document(format!("node {target:?} missing from its parent")))?;

        for &node in replacements {
            if let Some(n) = self.nodes.get_mut(node.0) {
                n.parent = Some(parent);
            }
        }
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.splice(position..=position, replacements.iter().copied());
        }
        if let Some(t) = self.nodes.get_mut(target.0) {
            t.parent = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn paragraph(doc: &mut Document, text: &str) -> (NodeId, NodeId) {
        let p = doc.create_element("p", &[]);
        let t = doc.create_text(text);
        doc.append(p, t).unwrap();
        doc.append(doc.root(), p).unwrap();
        (p, t)
    }

    #[test]
    fn test_text_nodes_in_document_order() {
        let mut doc = Document::new();
        let (_, a) = paragraph(&mut doc, "a");
        let (p, b) = paragraph(&mut doc, "b");
        let em = doc.create_element("em", &[]);
        let c = doc.create_text("c");
        doc.append(em, c).unwrap();
        doc.append(p, em).unwrap();
        assert_eq!(doc.text_nodes(), vec![a, b, c]);
        assert_eq!(doc.text_content(doc.root()), "abc");
    }

    #[test]
    fn test_replace_with_keeps_siblings() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "middle");
        let before = doc.create_text("x");
        doc.append(p, before).unwrap();
        doc.replace_with(before, &[]).unwrap();

        let first = doc.create_text("1");
        let second = doc.create_element("b", &[]);
        doc.replace_with(t, &[first, second]).unwrap();

        assert_eq!(doc.children(p), &[first, second]);
        assert!(!doc.is_attached(t));
        assert!(!doc.is_attached(before));
        assert!(doc.is_attached(second));
    }

    #[test]
    fn test_replace_detached_fails() {
        let mut doc = Document::new();
        let loose = doc.create_text("loose");
        assert!(doc.replace_with(loose, &[]).is_err());

        let (_, t) = paragraph(&mut doc, "t");
        doc.replace_with(t, &[]).unwrap();
        assert!(doc.replace_with(t, &[]).is_err());
    }

    #[test]
    fn test_append_rejects_bad_links() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "t");
        assert!(doc.append(t, p).is_err());
        assert!(doc.append(p, t).is_err());
        assert!(doc.append(p, p).is_err());
    }

    #[test]
    fn test_from_text_paragraphs() {
        let doc = Document::from_text("first line\nsecond line\n\n\nnext para\n");
        let paras = doc.children(doc.root());
        assert_eq!(paras.len(), 2);
        assert_eq!(doc.text_content(paras[0]), "first line\nsecond line");
        assert_eq!(doc.text_content(paras[1]), "next para");
        assert!(Document::from_text("").is_empty());
    }
}
