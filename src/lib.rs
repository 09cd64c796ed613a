//! A typed document writer and reader for engine data.
//!
//! [`Writer`] turns typed `write` calls into a document tree and renders it as
//! deterministic JSON-like text; [`Reader`] parses that text back and serves
//! typed `read` calls. Both navigate nested objects with a cursor stack, and
//! keys may be dotted paths (`"transform.position"`).

pub mod api;
pub mod codec;
pub mod error;
pub mod math;
pub mod node;
pub mod parser;
pub mod path;
pub mod persist;
pub mod reader;
pub mod render;
pub mod scanner;
pub mod utils;
pub mod writer;
mod serialization;

pub use api::{parse, parse_with_options};
pub use codec::{Decode, Encode};
pub use error::{DocError, ParserError};
pub use math::{Color, Matrix4, Rect, Vector2, Vector3, Vector4};
pub use node::{Document, Node, NodeId, NodeType};
pub use parser::ParseOptions;
pub use persist::Persist;
pub use reader::Reader;
pub use render::{render, RenderOptions};
pub use serialization::Value;
pub use writer::{Writer, TYPE_KEY};
