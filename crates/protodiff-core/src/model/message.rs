use serde::{Deserialize, Serialize};
use std::fmt;

/// Message Definition - a named record type
///
/// Fields are keyed by number, which is unique within the message. They are
/// stored in declaration order so that diff output follows the schema source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDefinition {
    /// Message name, relative to the file's package
    pub name: String,

    /// Field definitions in declaration order
    pub fields: Vec<FieldDefinition>,
}

impl MessageDefinition {
    /// Create a new message with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field definition (builder style)
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by number
    pub fn field(&self, number: i32) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.number == number)
    }
}

/// Field Definition - a single numbered field of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name (not part of the wire identity)
    pub name: String,

    /// Field number (the wire identity)
    pub number: i32,

    /// Wire-level type tag
    pub field_type: FieldType,

    /// Multiplicity marker
    pub label: FieldLabel,
}

impl FieldDefinition {
    /// Create a new field definition
    pub fn new(
        name: impl Into<String>,
        number: i32,
        field_type: FieldType,
        label: FieldLabel,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            field_type,
            label,
        }
    }

    /// Create a singular (`LABEL_OPTIONAL`) field
    pub fn optional(name: impl Into<String>, number: i32, field_type: FieldType) -> Self {
        Self::new(name, number, field_type, FieldLabel::Optional)
    }

    /// Create a `LABEL_REPEATED` field
    pub fn repeated(name: impl Into<String>, number: i32, field_type: FieldType) -> Self {
        Self::new(name, number, field_type, FieldLabel::Repeated)
    }
}

/// Wire-level type tag of a field
///
/// Mirrors the compiler's descriptor type enumeration. The canonical names
/// (`TYPE_STRING`, ...) are used both for serialization and for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "TYPE_DOUBLE")]
    Double,
    #[serde(rename = "TYPE_FLOAT")]
    Float,
    #[serde(rename = "TYPE_INT64")]
    Int64,
    #[serde(rename = "TYPE_UINT64")]
    Uint64,
    #[serde(rename = "TYPE_INT32")]
    Int32,
    #[serde(rename = "TYPE_FIXED64")]
    Fixed64,
    #[serde(rename = "TYPE_FIXED32")]
    Fixed32,
    #[serde(rename = "TYPE_BOOL")]
    Bool,
    #[serde(rename = "TYPE_STRING")]
    String,
    #[serde(rename = "TYPE_GROUP")]
    Group,
    #[serde(rename = "TYPE_MESSAGE")]
    Message,
    #[serde(rename = "TYPE_BYTES")]
    Bytes,
    #[serde(rename = "TYPE_UINT32")]
    Uint32,
    #[serde(rename = "TYPE_ENUM")]
    Enum,
    #[serde(rename = "TYPE_SFIXED32")]
    Sfixed32,
    #[serde(rename = "TYPE_SFIXED64")]
    Sfixed64,
    #[serde(rename = "TYPE_SINT32")]
    Sint32,
    #[serde(rename = "TYPE_SINT64")]
    Sint64,
}

impl FieldType {
    /// Canonical descriptor name of this type
    pub fn as_str_name(&self) -> &'static str {
        match self {
            FieldType::Double => "TYPE_DOUBLE",
            FieldType::Float => "TYPE_FLOAT",
            FieldType::Int64 => "TYPE_INT64",
            FieldType::Uint64 => "TYPE_UINT64",
            FieldType::Int32 => "TYPE_INT32",
            FieldType::Fixed64 => "TYPE_FIXED64",
            FieldType::Fixed32 => "TYPE_FIXED32",
            FieldType::Bool => "TYPE_BOOL",
            FieldType::String => "TYPE_STRING",
            FieldType::Group => "TYPE_GROUP",
            FieldType::Message => "TYPE_MESSAGE",
            FieldType::Bytes => "TYPE_BYTES",
            FieldType::Uint32 => "TYPE_UINT32",
            FieldType::Enum => "TYPE_ENUM",
            FieldType::Sfixed32 => "TYPE_SFIXED32",
            FieldType::Sfixed64 => "TYPE_SFIXED64",
            FieldType::Sint32 => "TYPE_SINT32",
            FieldType::Sint64 => "TYPE_SINT64",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// Multiplicity marker of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldLabel {
    #[serde(rename = "LABEL_OPTIONAL")]
    Optional,
    #[serde(rename = "LABEL_REQUIRED")]
    Required,
    #[serde(rename = "LABEL_REPEATED")]
    Repeated,
}

impl FieldLabel {
    /// Canonical descriptor name of this label
    pub fn as_str_name(&self) -> &'static str {
        match self {
            FieldLabel::Optional => "LABEL_OPTIONAL",
            FieldLabel::Required => "LABEL_REQUIRED",
            FieldLabel::Repeated => "LABEL_REPEATED",
        }
    }
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_display_uses_descriptor_names() {
        assert_eq!(FieldType::String.to_string(), "TYPE_STRING");
        assert_eq!(FieldType::Sfixed64.to_string(), "TYPE_SFIXED64");
    }

    #[test]
    fn test_field_type_serializes_as_descriptor_name() {
        let json = serde_json::to_string(&FieldType::Bool).unwrap();
        assert_eq!(json, "\"TYPE_BOOL\"");
    }

    #[test]
    fn test_label_display_uses_descriptor_names() {
        assert_eq!(FieldLabel::Repeated.to_string(), "LABEL_REPEATED");
    }

    #[test]
    fn test_field_lookup_by_number() {
        let message = MessageDefinition::new("M")
            .with_field(FieldDefinition::optional("a", 1, FieldType::String))
            .with_field(FieldDefinition::repeated("b", 7, FieldType::Int32));

        assert_eq!(message.field(7).map(|f| f.name.as_str()), Some("b"));
        assert!(message.field(2).is_none());
    }
}
