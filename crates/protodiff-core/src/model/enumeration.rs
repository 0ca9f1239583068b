use serde::{Deserialize, Serialize};

/// Enum Definition - a named set of symbolic integer constants
///
/// Values are stored in declaration order. Value numbers need not be unique:
/// an enum with aliasing enabled may bind several names to one number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDefinition {
    /// Enum name, relative to the file's package
    pub name: String,

    /// Value definitions in declaration order
    pub values: Vec<EnumValueDefinition>,
}

impl EnumDefinition {
    /// Create a new enum with no values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Append a value (builder style)
    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValueDefinition::new(name, number));
        self
    }
}

/// A single enum constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDefinition {
    /// Symbolic name
    pub name: String,

    /// Integer value on the wire
    pub number: i32,
}

impl EnumValueDefinition {
    /// Create a new enum value
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}
