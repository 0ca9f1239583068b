pub mod enumeration;
pub mod file;
pub mod message;
pub mod service;
pub mod snapshot;

pub use enumeration::{EnumDefinition, EnumValueDefinition};
pub use file::FileDefinition;
pub use message::{FieldDefinition, FieldLabel, FieldType, MessageDefinition};
pub use service::{MethodDefinition, ServiceDefinition};
pub use snapshot::SchemaSnapshot;
