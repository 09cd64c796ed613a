use crate::reader::Reader;
use crate::writer::Writer;

/// Implemented by engine types that save themselves into a document.
///
/// `serialize` and `deserialize` may visit fields in any order; only the keys
/// have to agree. `deserialize` should leave fields it cannot read at their
/// current values.
///
/// ```
/// use scene_doc::{Persist, Reader, Vector3, Writer};
///
/// #[derive(Default)]
/// struct Light {
///     intensity: f32,
///     direction: Vector3,
/// }
///
/// impl Persist for Light {
///     const TYPE_NAME: &'static str = "Light";
///
///     fn serialize(&self, writer: &mut Writer) {
///         writer.write("intensity", self.intensity);
///         writer.write("direction", self.direction);
///     }
///
///     fn deserialize(&mut self, reader: &mut Reader) {
///         reader.read("direction", &mut self.direction);
///         reader.read("intensity", &mut self.intensity);
///     }
/// }
///
/// let mut writer = Writer::new();
/// writer.write_persisted("sun", &Light { intensity: 2.0, direction: Vector3::new(0.0, -1.0, 0.0) });
///
/// let mut reader = Reader::new();
/// reader.load_from_string(&writer.to_json()).unwrap();
/// let mut sun = Light::default();
/// assert!(reader.read_persisted("sun", &mut sun));
/// assert_eq!(sun.intensity, 2.0);
/// ```
pub trait Persist {
    /// Stored in the reserved `__type` member of the object.
    const TYPE_NAME: &'static str;

    fn serialize(&self, writer: &mut Writer);

    fn deserialize(&mut self, reader: &mut Reader);
}
