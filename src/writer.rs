use crate::codec::Encode;
use crate::error::DocError;
use crate::node::{Document, Node, NodeId};
use crate::persist::Persist;
use crate::render::{render, RenderOptions};
use crate::serialization::{to_value, Value};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

/// Reserved member holding the type name given to [`Writer::write_object`].
pub const TYPE_KEY: &str = "__type";

/// Builds a [`Document`] from typed writes.
///
/// Writes go into the container on top of the cursor stack: the root object
/// at first, then whatever [`write_object`](Self::write_object) or
/// [`write_array`](Self::write_array) opened last. Inside an array scope keys
/// are ignored and values are appended in call order.
///
/// ```
/// use scene_doc::{Vector3, Writer};
///
/// let mut writer = Writer::new();
/// writer.write("health", 100);
/// writer.write_object("transform", "Transform");
/// writer.write("position", Vector3::new(1.0, 2.0, 3.0));
/// writer.end_object();
///
/// assert!(writer.to_json().contains("\"health\": 100"));
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    document: Document,
    stack: Vec<NodeId>,
    options: RenderOptions,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            document: Document::new(),
            stack: vec![NodeId::ROOT],
            options,
        }
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub fn write<T: Encode>(&mut self, key: &str, value: T) {
        let id = value.encode(&mut self.document);
        self.attach(key, id);
    }

    pub fn write_null(&mut self, key: &str) {
        let id = self.document.insert(Node::Null);
        self.attach(key, id);
    }

    /// Opens a nested object tagged with `type_name`. Writes target it until
    /// the matching [`end_object`](Self::end_object).
    pub fn write_object(&mut self, key: &str, type_name: &str) {
        let object = self.document.insert(Node::Object(BTreeMap::new()));
        let tag = self.document.insert(Node::String(type_name.to_string()));
        self.document.set_child(object, TYPE_KEY, tag);
        if self.attach(key, object) {
            self.stack.push(object);
        }
    }

    /// Opens a nested array. Writes append to it until
    /// [`end_array`](Self::end_array).
    pub fn write_array(&mut self, key: &str) {
        let array = self.document.insert(Node::Array(Vec::new()));
        if self.attach(key, array) {
            self.stack.push(array);
        }
    }

    pub fn end_object(&mut self) {
        self.close(Node::is_object, "end_object");
    }

    pub fn end_array(&mut self) {
        self.close(Node::is_array, "end_array");
    }

    /// Records a placeholder noting the payload size. The bytes themselves
    /// are not stored and cannot be read back.
    pub fn write_binary(&mut self, key: &str, data: &[u8]) {
        log::debug!("write_binary({key}): storing a placeholder for {} bytes", data.len());
        self.write(key, format!("<binary:{} bytes>", data.len()));
    }

    /// Writes `value` as an object tagged with [`Persist::TYPE_NAME`]. The
    /// cursor stack is restored afterwards even if `serialize` left scopes
    /// open.
    pub fn write_persisted<T: Persist>(&mut self, key: &str, value: &T) {
        let depth = self.stack.len();
        self.write_object(key, T::TYPE_NAME);
        value.serialize(self);
        if self.stack.len() != depth + 1 {
            log::warn!(
                "{}::serialize left the writer at depth {}, expected {}",
                T::TYPE_NAME,
                self.stack.len(),
                depth + 1
            );
        }
        self.stack.truncate(depth);
    }

    /// Renders the whole tree in the canonical text form.
    pub fn to_json(&self) -> String {
        render(&self.document, &self.options)
    }

    /// Renders and writes the tree to `path`, replacing any existing file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), DocError> {
        let path = path.as_ref();
        let text = self.to_json();
        std::fs::write(path, &text).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("saved {} bytes to {}", text.len(), path.display());
        Ok(())
    }

    /// Serializes the tree into a generic, serializable [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        to_value(&self.document, NodeId::ROOT)
    }

    /// Exports the tree as YAML.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_value())
    }

    /// Exports the tree as compact standard JSON, floats at full precision.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }

    /// Current nesting depth; 1 at the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Discards everything written so far.
    pub fn clear(&mut self) {
        self.document.clear();
        self.stack.truncate(1);
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn attach(&mut self, key: &str, id: NodeId) -> bool {
        let top = self.top();
        let attached = if self.document.get(top).is_some_and(Node::is_array) {
            self.document.push_element(top, id)
        } else {
            self.document.set_child(top, key, id)
        };
        if !attached {
            log::warn!("cannot write `{key}`: current scope is not a container");
        }
        attached
    }

    fn close(&mut self, is_expected: fn(&Node) -> bool, operation: &str) {
        if self.stack.len() <= 1 {
            log::warn!("{operation} called at the root, ignoring");
            return;
        }
        match self.document.get(self.top()) {
            Some(node) if is_expected(node) => {
                self.stack.pop();
            }
            _ => log::warn!("{operation} does not match the open scope, ignoring"),
        }
    }
}

impl Display for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
