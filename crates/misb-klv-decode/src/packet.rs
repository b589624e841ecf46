use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::table::FieldSpec;
use crate::value::Value;

/// One decoded item of a packet.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Local tag id.
    pub tag: u8,
    /// Output field name from the decode table.
    pub name: &'static str,
    /// Decoded value; `None` when the tag has no decode rule or the value
    /// length did not fit it.
    pub value: Option<Value>,
}

/// A decoded UAS Datalink Local Set packet.
///
/// Fields keep first-seen order; a repeated tag replaces the earlier value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Packet {
    fields: Vec<Field>,
    /// Checksum declared by the packet's final item.
    pub checksum: u16,
    /// Whether the declared checksum matches the computed one.
    pub checksum_valid: bool,
}

impl Packet {
    /// Record a decoded item.
    pub(crate) fn insert(&mut self, spec: &FieldSpec, value: Option<Value>) {
        match self.fields.iter_mut().find(|f| f.tag == spec.tag) {
            Some(existing) => existing.value = value,
            None => self.fields.push(Field {
                tag: spec.tag,
                name: spec.name,
                value,
            }),
        }
    }

    /// Drop every field without a value.
    pub fn remove_undefined(&mut self) {
        self.fields.retain(|f| f.value.is_some());
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_ref())
    }

    /// Value of the field with local tag `tag`.
    pub fn get_tag(&self, tag: u8) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .and_then(|f| f.value.as_ref())
    }

    /// True if the packet carries the field called `name`, decoded or not.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Fields in first-seen order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the packet holds no fields besides the checksum.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serializes as a flat map: one entry per field (`null` when undecoded),
/// then `checksum` and `checksum_valid`.
impl Serialize for Packet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for field in &self.fields {
            map.serialize_entry(field.name, &field.value)?;
        }
        map.serialize_entry("checksum", &self.checksum)?;
        map.serialize_entry("checksum_valid", &self.checksum_valid)?;
        map.end()
    }
}
