//! Dotted key lookup over a [`Document`].

use crate::node::{Document, NodeId};

/// Resolves `key` starting at `from`.
///
/// `"a.b.c"` looks up `a` among the direct children of `from`, then `b` inside
/// that, and so on. Only objects are descended into, so a path that crosses an
/// array or a scalar resolves to nothing. A key without a dot is a plain
/// direct lookup.
pub fn resolve(doc: &Document, from: NodeId, key: &str) -> Option<NodeId> {
    let mut current = from;
    let mut rest = key;
    loop {
        match rest.split_once('.') {
            Some((head, tail)) => {
                current = doc.child(current, head)?;
                rest = tail;
            }
            None => return doc.child(current, rest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn sample() -> Document {
        let mut doc = Document::new();
        let transform = doc.insert(Node::Object(Default::default()));
        let position = doc.insert(Node::Object(Default::default()));
        let x = doc.insert(Node::Float(1.5));
        doc.set_child(position, "x", x);
        doc.set_child(transform, "position", position);
        doc.set_child(NodeId::ROOT, "transform", transform);

        let list = doc.insert(Node::Array(Vec::new()));
        let element = doc.insert(Node::Object(Default::default()));
        doc.push_element(list, element);
        doc.set_child(NodeId::ROOT, "list", list);
        doc
    }

    #[test]
    fn test_direct_lookup() {
        let doc = sample();
        assert!(resolve(&doc, NodeId::ROOT, "transform").is_some());
        assert!(resolve(&doc, NodeId::ROOT, "missing").is_none());
    }

    #[test]
    fn test_dotted_lookup() {
        let doc = sample();
        let x = resolve(&doc, NodeId::ROOT, "transform.position.x").unwrap();
        assert_eq!(doc.get(x), Some(&Node::Float(1.5)));
    }

    #[test]
    fn test_dotted_lookup_from_nested_start() {
        let doc = sample();
        let transform = resolve(&doc, NodeId::ROOT, "transform").unwrap();
        assert!(resolve(&doc, transform, "position.x").is_some());
        assert!(resolve(&doc, transform, "transform").is_none());
    }

    #[test]
    fn test_path_cannot_cross_arrays_or_scalars() {
        let doc = sample();
        assert!(resolve(&doc, NodeId::ROOT, "list.0").is_none());
        assert!(resolve(&doc, NodeId::ROOT, "transform.position.x.y").is_none());
    }

    #[test]
    fn test_missing_intermediate_segment() {
        let doc = sample();
        assert!(resolve(&doc, NodeId::ROOT, "transform.rotation.x").is_none());
    }
}
