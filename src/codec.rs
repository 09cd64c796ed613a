//! Mapping between Rust values and document nodes.
//!
//! [`Encode`] is what the writer accepts, [`Decode`] is what the reader can
//! produce. Decoding never partially succeeds: a composite or a sequence either
//! decodes completely or yields `None`.

use crate::math::{Color, Matrix4, Rect, Vector2, Vector3, Vector4};
use crate::node::{Document, Node, NodeId};

/// A value the writer can store.
pub trait Encode {
    /// Adds the value to `doc` as a detached node and returns its id.
    fn encode(&self, doc: &mut Document) -> NodeId;
}

/// A value the reader can produce from a node.
pub trait Decode: Sized {
    /// Short description used in type mismatch errors.
    const EXPECTED: &'static str;

    fn decode(doc: &Document, id: NodeId) -> Option<Self>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, doc: &mut Document) -> NodeId {
        (**self).encode(doc)
    }
}

impl Encode for bool {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Bool(*self))
    }
}

impl Decode for bool {
    const EXPECTED: &'static str = "bool";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// `f` with its fraction dropped, if that fits in an `i64`. `as` would
/// saturate instead.
fn truncate_to_i64(f: f64) -> Option<i64> {
    // 2^63; i64::MAX itself is not representable as f64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    (t >= -LIMIT && t < LIMIT).then_some(t as i64)
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, doc: &mut Document) -> NodeId {
                    doc.insert(Node::Int(i64::from(*self)))
                }
            }

            impl Decode for $ty {
                const EXPECTED: &'static str = "int";

                /// Floats truncate toward zero. Out of range values fail.
                fn decode(doc: &Document, id: NodeId) -> Option<Self> {
                    match doc.get(id)? {
                        Node::Int(i) => <$ty>::try_from(*i).ok(),
                        Node::Float(f) => <$ty>::try_from(truncate_to_i64(*f)?).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_integer!(i32, i64, u32);

impl Encode for f32 {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Float(f64::from(*self)))
    }
}

impl Decode for f32 {
    const EXPECTED: &'static str = "float";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        doc.get(id)?.as_f64().map(|f| f as f32)
    }
}

impl Encode for f64 {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Float(*self))
    }
}

impl Decode for f64 {
    const EXPECTED: &'static str = "float";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        doc.get(id)?.as_f64()
    }
}

impl Encode for str {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::String(self.to_string()))
    }
}

impl Encode for String {
    fn encode(&self, doc: &mut Document) -> NodeId {
        self.as_str().encode(doc)
    }
}

impl Decode for String {
    const EXPECTED: &'static str = "string";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Reads a numeric member of an object as `f32`.
fn field(doc: &Document, object: NodeId, name: &str) -> Option<f32> {
    let id = doc.child(object, name)?;
    doc.get(id)?.as_f64().map(|f| f as f32)
}

impl Encode for Vector2 {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Vector2(*self))
    }
}

impl Decode for Vector2 {
    const EXPECTED: &'static str = "object with x, y";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Vector2(v) => Some(*v),
            Node::Object(_) => Some(Vector2::new(field(doc, id, "x")?, field(doc, id, "y")?)),
            _ => None,
        }
    }
}

impl Encode for Vector3 {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Vector3(*self))
    }
}

impl Decode for Vector3 {
    const EXPECTED: &'static str = "object with x, y, z";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Vector3(v) => Some(*v),
            Node::Object(_) => Some(Vector3::new(
                field(doc, id, "x")?,
                field(doc, id, "y")?,
                field(doc, id, "z")?,
            )),
            _ => None,
        }
    }
}

impl Encode for Vector4 {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Vector4(*self))
    }
}

impl Decode for Vector4 {
    const EXPECTED: &'static str = "object with x, y, z, w";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Vector4(v) => Some(*v),
            Node::Object(_) => Some(Vector4::new(
                field(doc, id, "x")?,
                field(doc, id, "y")?,
                field(doc, id, "z")?,
                field(doc, id, "w")?,
            )),
            _ => None,
        }
    }
}

impl Encode for Color {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Color(*self))
    }
}

impl Decode for Color {
    const EXPECTED: &'static str = "object with r, g, b and optional a";

    /// A missing alpha channel means opaque. A present but non-numeric one
    /// fails the whole color.
    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Color(c) => Some(*c),
            Node::Object(_) => {
                let a = match doc.child(id, "a") {
                    Some(_) => field(doc, id, "a")?,
                    None => 1.0,
                };
                Some(Color::new(
                    field(doc, id, "r")?,
                    field(doc, id, "g")?,
                    field(doc, id, "b")?,
                    a,
                ))
            }
            _ => None,
        }
    }
}

impl Encode for Rect {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Rect(*self))
    }
}

impl Decode for Rect {
    const EXPECTED: &'static str = "object with x, y, width, height";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Rect(r) => Some(*r),
            Node::Object(_) => Some(Rect::new(
                field(doc, id, "x")?,
                field(doc, id, "y")?,
                field(doc, id, "width")?,
                field(doc, id, "height")?,
            )),
            _ => None,
        }
    }
}

impl Encode for Matrix4 {
    fn encode(&self, doc: &mut Document) -> NodeId {
        doc.insert(Node::Matrix4(*self))
    }
}

impl Decode for Matrix4 {
    const EXPECTED: &'static str = "array of 16 numbers";

    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        match doc.get(id)? {
            Node::Matrix4(m) => Some(*m),
            Node::Array(elements) if elements.len() == 16 => {
                let mut m = [0.0f32; 16];
                for (slot, element) in m.iter_mut().zip(elements) {
                    *slot = doc.get(*element)?.as_f64()? as f32;
                }
                Some(Matrix4::from_array(m))
            }
            _ => None,
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, doc: &mut Document) -> NodeId {
        let array = doc.insert(Node::Array(Vec::with_capacity(self.len())));
        for item in self {
            let element = item.encode(doc);
            doc.push_element(array, element);
        }
        array
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, doc: &mut Document) -> NodeId {
        self.as_slice().encode(doc)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, doc: &mut Document) -> NodeId {
        self.as_slice().encode(doc)
    }
}

impl<T: Decode> Decode for Vec<T> {
    const EXPECTED: &'static str = "array";

    /// All or nothing: one element of the wrong shape fails the sequence.
    fn decode(doc: &Document, id: NodeId) -> Option<Self> {
        doc.elements(id)?
            .iter()
            .map(|element| T::decode(doc, *element))
            .collect()
    }
}
