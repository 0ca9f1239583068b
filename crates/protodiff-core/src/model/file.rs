use serde::{Deserialize, Serialize};

use crate::model::{EnumDefinition, MessageDefinition, ServiceDefinition};

/// File Definition - one compiled schema file
///
/// Each file:
/// - Is identified by its compiler-relative name (e.g. `api/v1/hello.proto`)
/// - Declares a dotted package identifier (empty when the file has none)
/// - Owns its messages, enums and services, each unique by name within the file
///
/// Nested declarations are flattened into `messages` / `enums` under their
/// dotted path relative to the package (`Outer.Inner`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDefinition {
    /// File name as passed to the compiler
    pub name: String,

    /// Dotted package identifier
    pub package: String,

    /// Message definitions in declaration order
    pub messages: Vec<MessageDefinition>,

    /// Enum definitions in declaration order
    pub enums: Vec<EnumDefinition>,

    /// Service definitions in declaration order
    pub services: Vec<ServiceDefinition>,
}

impl FileDefinition {
    /// Create a new file with no declarations
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Append a message definition (builder style)
    pub fn with_message(mut self, message: MessageDefinition) -> Self {
        self.messages.push(message);
        self
    }

    /// Append an enum definition (builder style)
    pub fn with_enum(mut self, definition: EnumDefinition) -> Self {
        self.enums.push(definition);
        self
    }

    /// Append a service definition (builder style)
    pub fn with_service(mut self, service: ServiceDefinition) -> Self {
        self.services.push(service);
        self
    }
}
