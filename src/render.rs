//! Deterministic text rendering of a [`Document`].

use crate::node::{Document, Node, NodeId};
use std::fmt::Write;

/// Layout knobs for rendering. The defaults are the canonical format that
/// the reader and every saved file expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Digits after the decimal point for every float.
    pub float_precision: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            float_precision: 6,
        }
    }
}

/// Renders the subtree at `id`. Object members come out in key order, so the
/// same tree always renders to the same text.
pub fn render_node(doc: &Document, id: NodeId, options: &RenderOptions) -> String {
    let mut out = String::new();
    Renderer { doc, options, out: &mut out }.node(id, 0);
    out
}

/// Renders a whole document from its root.
pub fn render(doc: &Document, options: &RenderOptions) -> String {
    render_node(doc, doc.root(), options)
}

struct Renderer<'a> {
    doc: &'a Document,
    options: &'a RenderOptions,
    out: &'a mut String,
}

impl Renderer<'_> {
    fn node(&mut self, id: NodeId, level: usize) {
        let Some(node) = self.doc.get(id) else {
            self.out.push_str("null");
            return;
        };
        match node {
            Node::Null => self.out.push_str("null"),
            Node::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Node::Int(i) => {
                let _ = write!(self.out, "{i}");
            }
            Node::Float(f) => self.float(*f),
            Node::String(s) => self.string(s),
            Node::Vector2(v) => self.fields(&[("x", v.x), ("y", v.y)], level),
            Node::Vector3(v) => self.fields(&[("x", v.x), ("y", v.y), ("z", v.z)], level),
            Node::Vector4(v) => {
                self.fields(&[("x", v.x), ("y", v.y), ("z", v.z), ("w", v.w)], level)
            }
            Node::Color(c) => {
                self.fields(&[("r", c.r), ("g", c.g), ("b", c.b), ("a", c.a)], level)
            }
            Node::Rect(r) => self.fields(
                &[
                    ("x", r.x),
                    ("y", r.y),
                    ("width", r.width),
                    ("height", r.height),
                ],
                level,
            ),
            Node::Matrix4(m) => {
                self.out.push('[');
                for (i, value) in m.m.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(level + 1);
                    self.float(f64::from(*value));
                }
                self.newline(level);
                self.out.push(']');
            }
            Node::Object(children) => {
                if children.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push('{');
                for (i, (key, child)) in children.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(level + 1);
                    self.string(key);
                    self.out.push_str(": ");
                    self.node(*child, level + 1);
                }
                self.newline(level);
                self.out.push('}');
            }
            Node::Array(elements) => {
                if elements.is_empty() {
                    self.out.push_str("[]");
                    return;
                }
                self.out.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.newline(level + 1);
                    self.node(*element, level + 1);
                }
                self.newline(level);
                self.out.push(']');
            }
        }
    }

    /// Fixed-shape composites keep their declared field order.
    fn fields(&mut self, fields: &[(&str, f32)], level: usize) {
        self.out.push('{');
        for (i, (name, value)) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.newline(level + 1);
            self.string(name);
            self.out.push_str(": ");
            self.float(f64::from(*value));
        }
        self.newline(level);
        self.out.push('}');
    }

    fn float(&mut self, value: f64) {
        if !value.is_finite() {
            log::warn!("rendering non-finite float {value} as null");
            self.out.push_str("null");
            return;
        }
        let _ = write!(self.out, "{:.*}", self.options.float_precision, value);
    }

    /// Control characters without a short escape are emitted raw. A `\u`
    /// escape would come back as the placeholder character.
    fn string(&mut self, value: &str) {
        self.out.push('"');
        for c in value.chars() {
            match c {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\u{8}' => self.out.push_str("\\b"),
                '\u{c}' => self.out.push_str("\\f"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn newline(&mut self, level: usize) {
        self.out.push('\n');
        for _ in 0..level * self.options.indent {
            self.out.push(' ');
        }
    }
}
