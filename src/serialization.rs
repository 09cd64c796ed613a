use crate::node::{Document, Node, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;

/// A generic, serializable view of a document subtree, for exporting through
/// serde formats. Composite nodes become plain objects and a matrix becomes a
/// flat array, mirroring the text format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

fn fields(pairs: &[(&str, f32)]) -> Value {
    Value::Object(
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), Value::Float(f64::from(*value))))
            .collect(),
    )
}

pub(crate) fn to_value(doc: &Document, id: NodeId) -> Value {
    let Some(node) = doc.get(id) else {
        return Value::Null;
    };
    match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Int(i) => Value::Int(*i),
        Node::Float(f) => Value::Float(*f),
        Node::String(s) => Value::String(s.clone()),
        Node::Vector2(v) => fields(&[("x", v.x), ("y", v.y)]),
        Node::Vector3(v) => fields(&[("x", v.x), ("y", v.y), ("z", v.z)]),
        Node::Vector4(v) => fields(&[("x", v.x), ("y", v.y), ("z", v.z), ("w", v.w)]),
        Node::Color(c) => fields(&[("r", c.r), ("g", c.g), ("b", c.b), ("a", c.a)]),
        Node::Rect(r) => fields(&[
            ("x", r.x),
            ("y", r.y),
            ("width", r.width),
            ("height", r.height),
        ]),
        Node::Matrix4(m) => Value::Array(
            m.m.iter()
                .map(|value| Value::Float(f64::from(*value)))
                .collect(),
        ),
        Node::Object(children) => Value::Object(
            children
                .iter()
                .map(|(key, child)| (key.clone(), to_value(doc, *child)))
                .collect(),
        ),
        Node::Array(elements) => {
            Value::Array(elements.iter().map(|element| to_value(doc, *element)).collect())
        }
    }
}
