use crate::math::{Color, Matrix4, Rect, Vector2, Vector3, Vector4};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Index of a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root object of every document.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One typed value in the document tree.
///
/// Containers do not own their children directly; they hold ids into the
/// arena of the [`Document`] they belong to.
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vector2(Vector2),
    Vector3(Vector3),
    Vector4(Vector4),
    Color(Color),
    Rect(Rect),
    Matrix4(Matrix4),
    Object(BTreeMap<String, NodeId>),
    Array(Vec<NodeId>),
}

/// The tag of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Vector2,
    Vector3,
    Vector4,
    Color,
    Rect,
    Matrix4,
    Object,
    Array,
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Null => NodeType::Null,
            Node::Bool(_) => NodeType::Bool,
            Node::Int(_) => NodeType::Int,
            Node::Float(_) => NodeType::Float,
            Node::String(_) => NodeType::String,
            Node::Vector2(_) => NodeType::Vector2,
            Node::Vector3(_) => NodeType::Vector3,
            Node::Vector4(_) => NodeType::Vector4,
            Node::Color(_) => NodeType::Color,
            Node::Rect(_) => NodeType::Rect,
            Node::Matrix4(_) => NodeType::Matrix4,
            Node::Object(_) => NodeType::Object,
            Node::Array(_) => NodeType::Array,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    /// Numeric view of Int and Float nodes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(*i as f64),
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeType::Null => "null",
            NodeType::Bool => "bool",
            NodeType::Int => "int",
            NodeType::Float => "float",
            NodeType::String => "string",
            NodeType::Vector2 => "vector2",
            NodeType::Vector3 => "vector3",
            NodeType::Vector4 => "vector4",
            NodeType::Color => "color",
            NodeType::Rect => "rect",
            NodeType::Matrix4 => "matrix4",
            NodeType::Object => "object",
            NodeType::Array => "array",
        };
        write!(f, "{name}")
    }
}

/// An owned tree of [`Node`]s stored in a flat arena.
///
/// Slot 0 always holds the root object. Subtrees dropped by a key
/// replacement are freed and their slots reused by later inserts.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    free_indices: Vec<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::Object(BTreeMap::new()))],
            free_indices: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn node_type(&self, id: NodeId) -> Option<NodeType> {
        self.get(id).map(Node::node_type)
    }

    /// Direct child of an object. Arrays have no named children.
    pub fn child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        match self.get(parent)? {
            Node::Object(children) => children.get(key).copied(),
            _ => None,
        }
    }

    /// Named children of an object, in key order.
    pub fn children(&self, id: NodeId) -> Option<&BTreeMap<String, NodeId>> {
        match self.get(id)? {
            Node::Object(children) => Some(children),
            _ => None,
        }
    }

    /// Elements of an array, in append order.
    pub fn elements(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.get(id)? {
            Node::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_indices.len()
    }

    /// True when the root object has no children.
    pub fn is_empty(&self) -> bool {
        self.children(NodeId::ROOT).map_or(true, BTreeMap::is_empty)
    }

    /// Drops everything but an empty root.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Some(Node::Object(BTreeMap::new())));
        self.free_indices.clear();
    }

    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free_indices.pop() {
            self.nodes[index] = Some(node);
            return NodeId(index as u32);
        }
        let index = self.nodes.len();
        self.nodes.push(Some(node));
        NodeId(index as u32)
    }

    /// Attaches `child` under `key`, discarding any subtree previously stored
    /// there. Returns false (and frees `child`) if `parent` is not an object.
    pub(crate) fn set_child(&mut self, parent: NodeId, key: &str, child: NodeId) -> bool {
        let previous = match self.get_mut(parent) {
            Some(Node::Object(children)) => Ok(children.insert(key.to_string(), child)),
            _ => Err(()),
        };
        match previous {
            Ok(replaced) => {
                if let Some(old) = replaced {
                    self.remove_subtree(old);
                }
                true
            }
            Err(()) => {
                self.remove_subtree(child);
                false
            }
        }
    }

    /// Appends `child` to an array. Returns false (and frees `child`) if
    /// `parent` is not an array.
    pub(crate) fn push_element(&mut self, parent: NodeId, child: NodeId) -> bool {
        if let Some(Node::Array(elements)) = self.get_mut(parent) {
            elements.push(child);
            return true;
        }
        self.remove_subtree(child);
        false
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if id == NodeId::ROOT {
            return;
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.get_mut(current.index()).and_then(Option::take) else {
                continue;
            };
            match node {
                Node::Object(children) => pending.extend(children.into_values()),
                Node::Array(elements) => pending.extend(elements),
                _ => {}
            }
            self.free_indices.push(current.index());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty_root() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.node_type(doc.root()), Some(NodeType::Object));
    }

    #[test]
    fn test_replacing_a_key_frees_the_old_subtree() {
        let mut doc = Document::new();
        let array = doc.insert(Node::Array(Vec::new()));
        let a = doc.insert(Node::Int(1));
        let b = doc.insert(Node::Int(2));
        doc.push_element(array, a);
        doc.push_element(array, b);
        doc.set_child(NodeId::ROOT, "list", array);
        assert_eq!(doc.len(), 4);

        let replacement = doc.insert(Node::Bool(true));
        doc.set_child(NodeId::ROOT, "list", replacement);
        assert_eq!(doc.len(), 2);
        let list = doc.child(NodeId::ROOT, "list").unwrap();
        assert_eq!(doc.get(list), Some(&Node::Bool(true)));

        // freed slots are reused
        let reused = doc.insert(Node::Null);
        assert!(reused.index() < 4);
    }

    #[test]
    fn test_set_child_on_non_object_is_rejected() {
        let mut doc = Document::new();
        let scalar = doc.insert(Node::Int(5));
        doc.set_child(NodeId::ROOT, "n", scalar);
        let orphan = doc.insert(Node::Int(6));
        assert!(!doc.set_child(scalar, "x", orphan));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_arrays_have_no_named_children() {
        let mut doc = Document::new();
        let array = doc.insert(Node::Array(Vec::new()));
        doc.set_child(NodeId::ROOT, "a", array);
        assert_eq!(doc.child(array, "0"), None);
        assert_eq!(doc.elements(array).map(<[NodeId]>::len), Some(0));
    }

    #[test]
    fn test_clear_resets_to_root() {
        let mut doc = Document::new();
        let n = doc.insert(Node::String("x".to_string()));
        doc.set_child(NodeId::ROOT, "s", n);
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_node_type_display() {
        assert_eq!(NodeType::Matrix4.to_string(), "matrix4");
        assert_eq!(Node::Float(1.0).node_type().to_string(), "float");
    }
}
