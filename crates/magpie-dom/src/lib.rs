//! Document tree for the Magpie parser.
//!
//! This crate provides the arena-based tree assembled by the tolerant HTML
//! parser. It is a scraping tree, not a rendering DOM: the synthetic root
//! is an ordinary element named `document`, attributes keep their document
//! order, and CDATA sections are preserved as their own node kind.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Parent links are non-owning indices, so every node has
//! exactly one owner (the arena) and cycles are unrepresentable. Nodes are
//! attached at creation through [`Document::append`] and never move.

use std::collections::HashSet;

/// A single `name="value"` pair on an element, after name sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Sanitized attribute name, unique within its element.
    pub name: String,
    /// Attribute value, kept verbatim.
    pub value: String,
}

/// A type-safe index into the document tree.
///
/// NodeId provides O(1) access to any node in the tree without borrowing
/// issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic root element is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the tree: its payload plus parent/child relationships.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,

    /// Parent index; `None` only for the synthetic root.
    pub parent: Option<NodeId>,

    /// Child indices, in document order.
    pub children: Vec<NodeId>,
}

/// The kinds of node the parser produces.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// An element, with its sanitized tag name and attribute list.
    Element(ElementData),
    /// A run of character data, already entity-decoded by the lexer.
    Text(String),
    /// A comment body, without the `<!--` / `-->` delimiters.
    Comment(String),
    /// A CDATA section body, without the `<![CDATA[` / `]]>` delimiters.
    CData(String),
}

/// Element-specific data.
///
/// Attributes are an ordered list rather than a map: duplicate resolution
/// re-appends the surviving attribute at the end, and serializers see that
/// order. Names are unique once sanitization has run.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's sanitized tag name.
    pub tag_name: String,
    /// The element's attribute list.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Look up an attribute value by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    /// Returns the set of class names from the class attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.get("class") {
            Some(classlist) => classlist.split_whitespace().collect(),
            None => HashSet::new(),
        }
    }
}

/// Arena-based document tree with O(1) node access and traversal.
///
/// All nodes live in one contiguous vector, related by [`NodeId`] indices.
/// The synthetic root element (named `document`) is created together with
/// the arena and holds every top-level node the parser emits; callers that
/// want "the parsed markup" read the root's children.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree, indexed by NodeId.
    /// The synthetic root is always at index 0 (NodeId::ROOT).
    nodes: Vec<Node>,
}

impl Document {
    /// Tag name of the synthetic root element.
    pub const ROOT_NAME: &'static str = "document";

    /// Create a new tree holding only the synthetic root element.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Element(ElementData {
                tag_name: Self::ROOT_NAME.to_string(),
                attrs: Vec::new(),
            }),
            parent: None,
            children: Vec::new(),
        };
        Document { nodes: vec![root] }
    }

    /// Get the synthetic root's ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and attach it as the last child of `parent`.
    ///
    /// Attachment happens exactly once, here. A node never changes parent
    /// and cannot be shared between parents, which keeps the structure a
    /// tree by construction.
    pub fn append(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over all descendants of a node in document order, the node
    /// itself excluded.
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { tree: self, stack }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated character data of a node's subtree, in document order.
    ///
    /// Text and CDATA both contribute; comments do not. The node's own
    /// payload is included when it is itself text or CDATA.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else { return };
        match &node.node_type {
            NodeType::Text(s) | NodeType::CData(s) => out.push_str(s),
            NodeType::Element(_) => {
                for &child in &node.children {
                    self.collect_text(child, out);
                }
            }
            NodeType::Comment(_) => {}
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over descendants of a node, depth first in document order.
pub struct DescendantIterator<'a> {
    tree: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = self.tree.children(id);
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str) -> NodeType {
        NodeType::Element(ElementData {
            tag_name: name.to_string(),
            attrs: Vec::new(),
        })
    }

    #[test]
    fn test_new_tree_has_named_root() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(!doc.is_empty());
        let root = doc.as_element(doc.root()).unwrap();
        assert_eq!(root.tag_name, "document");
        assert!(doc.parent(doc.root()).is_none());
    }

    #[test]
    fn test_append_sets_parent_and_child_order() {
        let mut doc = Document::new();
        let div = doc.append(NodeId::ROOT, element("div"));
        let a = doc.append(div, NodeType::Text("a".to_string()));
        let b = doc.append(div, NodeType::Text("b".to_string()));

        assert_eq!(doc.parent(div), Some(NodeId::ROOT));
        assert_eq!(doc.children(div), &[a, b]);
        assert_eq!(doc.children(NodeId::ROOT), &[div]);
    }

    #[test]
    fn test_ancestors_walk_to_root() {
        let mut doc = Document::new();
        let table = doc.append(NodeId::ROOT, element("table"));
        let tr = doc.append(table, element("tr"));
        let td = doc.append(tr, element("td"));

        let chain: Vec<NodeId> = doc.ancestors(td).collect();
        assert_eq!(chain, vec![tr, table, NodeId::ROOT]);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let div = doc.append(NodeId::ROOT, element("div"));
        let p = doc.append(div, element("p"));
        let t1 = doc.append(p, NodeType::Text("one".to_string()));
        let span = doc.append(div, element("span"));

        let order: Vec<NodeId> = doc.descendants(NodeId::ROOT).collect();
        assert_eq!(order, vec![div, p, t1, span]);
        assert_eq!(doc.descendants(span).count(), 0);
    }

    #[test]
    fn test_text_content_includes_cdata_and_skips_comments() {
        let mut doc = Document::new();
        let div = doc.append(NodeId::ROOT, element("div"));
        let _ = doc.append(div, NodeType::Text("a".to_string()));
        let _ = doc.append(div, NodeType::Comment("nope".to_string()));
        let _ = doc.append(div, NodeType::CData("b".to_string()));
        let span = doc.append(div, element("span"));
        let _ = doc.append(span, NodeType::Text("c".to_string()));

        assert_eq!(doc.text_content(div), "abc");
    }

    #[test]
    fn test_attribute_accessors() {
        let data = ElementData {
            tag_name: "p".to_string(),
            attrs: vec![
                Attribute {
                    name: "id".to_string(),
                    value: "x".to_string(),
                },
                Attribute {
                    name: "class".to_string(),
                    value: "entry-content  wide".to_string(),
                },
            ],
        };
        assert_eq!(data.id(), Some("x"));
        assert!(data.classes().contains("entry-content"));
        assert!(data.classes().contains("wide"));
        assert_eq!(data.get("href"), None);
    }
}
