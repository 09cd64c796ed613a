use crate::codec::Decode;
use crate::error::DocError;
use crate::node::{Document, Node, NodeId, NodeType};
use crate::parser::{ParseOptions, Parser};
use crate::path::resolve;
use crate::persist::Persist;
use crate::serialization::{to_value, Value};
use crate::utils::get_line_and_column;
use crate::writer::TYPE_KEY;
use std::path::Path;

/// Position inside the array opened by [`Reader::begin_array`].
#[derive(Debug, Clone)]
struct ArrayCursor {
    array: NodeId,
    next: usize,
    /// Element this cursor pushed onto the object stack, if any.
    pushed: Option<NodeId>,
}

/// Parses text into a [`Document`] and reads typed values back out of it.
///
/// Reads resolve keys against the object on top of the cursor stack. A failed
/// read leaves the destination untouched, so callers pre-fill defaults:
///
/// ```
/// use scene_doc::Reader;
///
/// let mut reader = Reader::new();
/// reader.load_from_string(r#"{ "health": 100, "stats": { "speed": 2.5 } }"#).unwrap();
///
/// let mut health = 0;
/// let mut armor = 7;
/// let mut speed = 0.0f32;
/// assert!(reader.read("health", &mut health));
/// assert!(!reader.read("armor", &mut armor));
/// assert!(reader.read("stats.speed", &mut speed));
/// assert_eq!((health, armor, speed), (100, 7, 2.5));
/// ```
#[derive(Debug, Clone)]
pub struct Reader {
    document: Document,
    stack: Vec<NodeId>,
    array_cursor: Option<ArrayCursor>,
    options: ParseOptions,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            document: Document::new(),
            stack: vec![NodeId::ROOT],
            array_cursor: None,
            options,
        }
    }

    /// Wraps an existing tree, for instance one built by a
    /// [`Writer`](crate::Writer).
    pub fn from_document(document: Document) -> Self {
        let mut reader = Self::new();
        reader.document = document;
        reader
    }

    /// Replaces the current tree with the parsed contents of `text`.
    ///
    /// On error the reader is left holding an empty tree.
    pub fn load_from_string(&mut self, text: &str) -> Result<(), DocError> {
        self.load(text, self.options.clone())
    }

    /// Reads the whole file at `path` and parses it like
    /// [`load_from_string`](Self::load_from_string).
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), DocError> {
        let path = path.as_ref();
        self.reset();
        let text = std::fs::read_to_string(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = ParseOptions {
            source_name: path.display().to_string(),
            ..self.options.clone()
        };
        self.load(&text, options)
    }

    fn load(&mut self, text: &str, options: ParseOptions) -> Result<(), DocError> {
        self.reset();
        let name = options.source_name.clone();
        match Parser::with_options(text, options).parse_document() {
            Ok(document) => {
                log::debug!("loaded {name}: {} nodes", document.len());
                self.document = document;
                Ok(())
            }
            Err(err) => {
                let (line, column) = get_line_and_column(text, err.offset());
                log::debug!("failed to parse {name} at {line}:{column}: {err}");
                Err(err.into())
            }
        }
    }

    fn reset(&mut self) {
        self.document.clear();
        self.stack.truncate(1);
        self.array_cursor = None;
    }

    /// Reads `key` into `out`. Returns false, leaving `out` as it was, when
    /// the key is missing or holds an incompatible value.
    pub fn read<T: Decode>(&self, key: &str, out: &mut T) -> bool {
        match self.get(key) {
            Ok(value) => {
                *out = value;
                true
            }
            Err(_) => false,
        }
    }

    /// Like [`read`](Self::read), but reports why the read failed.
    pub fn get<T: Decode>(&self, key: &str) -> Result<T, DocError> {
        let id = resolve(&self.document, self.top(), key).ok_or_else(|| DocError::NotFound {
            key: key.to_string(),
        })?;
        T::decode(&self.document, id).ok_or_else(|| DocError::TypeMismatch {
            key: key.to_string(),
            expected: T::EXPECTED,
            found: self.document.node_type(id).unwrap_or(NodeType::Null),
        })
    }

    /// Enters the object at `key`. Returns false, changing nothing, if there
    /// is no object there.
    pub fn begin_object(&mut self, key: &str) -> bool {
        match resolve(&self.document, self.top(), key) {
            Some(id) if self.document.get(id).is_some_and(Node::is_object) => {
                self.stack.push(id);
                true
            }
            _ => false,
        }
    }

    /// Leaves the current object. Never pops the root.
    pub fn end_object(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("end_object called at the root, ignoring");
        }
    }

    /// Starts iterating the array at `key`. Step through it with
    /// [`next_array_element`](Self::next_array_element).
    pub fn begin_array(&mut self, key: &str) -> bool {
        match resolve(&self.document, self.top(), key) {
            Some(id) if self.document.get(id).is_some_and(Node::is_array) => {
                self.array_cursor = Some(ArrayCursor {
                    array: id,
                    next: 0,
                    pushed: None,
                });
                true
            }
            _ => false,
        }
    }

    /// Moves to the next element of the current array. When that element is
    /// an object it becomes the read target, replacing the previous element,
    /// and the call returns true. Scalar elements are skipped over with a
    /// false return; read those with a bulk `Vec<T>` read instead.
    pub fn next_array_element(&mut self) -> bool {
        let Some(cursor) = self.array_cursor.as_mut() else {
            return false;
        };
        let Some(&element) = self
            .document
            .elements(cursor.array)
            .and_then(|elements| elements.get(cursor.next))
        else {
            return false;
        };
        cursor.next += 1;
        if !self.document.get(element).is_some_and(Node::is_object) {
            return false;
        }
        if let Some(previous) = cursor.pushed.take() {
            if self.stack.len() > 1 && self.stack.last() == Some(&previous) {
                self.stack.pop();
            }
        }
        self.stack.push(element);
        cursor.pushed = Some(element);
        true
    }

    /// Stops iterating. Besides clearing the array cursor this also leaves
    /// the element entered by the last
    /// [`next_array_element`](Self::next_array_element), so the stack is back
    /// where it was before [`begin_array`](Self::begin_array). Do not follow
    /// it with an [`end_object`](Self::end_object) for that element: that
    /// would leave the enclosing object too.
    pub fn end_array(&mut self) {
        let Some(cursor) = self.array_cursor.take() else {
            return;
        };
        if let Some(pushed) = cursor.pushed {
            if self.stack.len() > 1 && self.stack.last() == Some(&pushed) {
                self.stack.pop();
            }
        }
    }

    /// Number of elements in the array at `key`.
    pub fn array_len(&self, key: &str) -> Option<usize> {
        let id = resolve(&self.document, self.top(), key)?;
        self.document.elements(id).map(<[NodeId]>::len)
    }

    /// Reads an object written by [`Writer::write_persisted`](crate::Writer::write_persisted).
    /// The cursor stack is restored afterwards.
    pub fn read_persisted<T: Persist>(&mut self, key: &str, value: &mut T) -> bool {
        let depth = self.stack.len();
        if !self.begin_object(key) {
            return false;
        }
        value.deserialize(self);
        self.stack.truncate(depth);
        true
    }

    /// True if the current object has a direct member named `key`. Dots are
    /// not interpreted.
    pub fn has_key(&self, key: &str) -> bool {
        self.document.child(self.top(), key).is_some()
    }

    /// Direct member names of the current object, in key order.
    pub fn keys(&self) -> Vec<String> {
        self.document
            .children(self.top())
            .map(|children| children.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The `__type` tag of the current object, or an empty string.
    pub fn object_type(&self) -> String {
        match self.document.child(self.top(), TYPE_KEY) {
            Some(id) => String::decode(&self.document, id).unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Current nesting depth; 1 at the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Serializes the loaded tree into a generic, serializable [`Value`].
    #[must_use]
    pub fn to_value(&self) -> Value {
        to_value(&self.document, NodeId::ROOT)
    }

    /// Exports the loaded tree as YAML.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_value())
    }

    /// Exports the loaded tree as compact standard JSON.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value())
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }
}
