//! Descriptor conversion
//!
//! Maps the compiler's `prost-types` descriptors onto the protodiff schema
//! model. Nested messages and enums are flattened under their dotted path
//! (`Outer.Inner`), directly after their parent message.

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FileDescriptorProto, FileDescriptorSet,
    ServiceDescriptorProto,
};

use protodiff_core::{
    EnumDefinition, FieldDefinition, FieldLabel, FieldType, FileDefinition, MessageDefinition,
    MethodDefinition, SchemaSnapshot, ServiceDefinition,
};

use crate::errors::{decode_failed, Result};

/// Build a snapshot from every file in a descriptor set
pub fn snapshot_from_descriptor_set(set: &FileDescriptorSet) -> SchemaSnapshot {
    SchemaSnapshot {
        files: set.file.iter().map(convert_file).collect(),
    }
}

/// Build a snapshot from a plugin request
///
/// Only the files the compiler was asked to generate are included; imported
/// dependencies are not part of the compared schema.
pub fn snapshot_from_request(request: &CodeGeneratorRequest) -> SchemaSnapshot {
    let files = request
        .proto_file
        .iter()
        .filter(|file| request.file_to_generate.iter().any(|n| n == file.name()))
        .map(convert_file)
        .collect();
    SchemaSnapshot { files }
}

/// Decode an encoded `FileDescriptorSet`
pub fn decode_descriptor_set(bytes: &[u8]) -> Result<FileDescriptorSet> {
    FileDescriptorSet::decode(bytes).map_err(|e| decode_failed("descriptor set", e))
}

/// Decode an encoded `CodeGeneratorRequest`
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    CodeGeneratorRequest::decode(bytes).map_err(|e| decode_failed("code generator request", e))
}

fn convert_file(file: &FileDescriptorProto) -> FileDefinition {
    let mut definition = FileDefinition::new(file.name(), file.package());

    definition.enums = file.enum_type.iter().map(|e| convert_enum(e, "")).collect();
    definition.services = file.service.iter().map(convert_service).collect();
    for message in &file.message_type {
        flatten_message(message, "", &mut definition);
    }

    definition
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn flatten_message(message: &DescriptorProto, prefix: &str, file: &mut FileDefinition) {
    let name = qualify(prefix, message.name());

    let converted = message
        .field
        .iter()
        .fold(MessageDefinition::new(name.clone()), |m, field| {
            m.with_field(FieldDefinition::new(
                field.name(),
                field.number(),
                convert_type(field.r#type()),
                convert_label(field.label()),
            ))
        });
    file.messages.push(converted);

    for nested in &message.enum_type {
        file.enums.push(convert_enum(nested, &name));
    }
    for nested in &message.nested_type {
        flatten_message(nested, &name, file);
    }
}

fn convert_enum(definition: &EnumDescriptorProto, prefix: &str) -> EnumDefinition {
    definition.value.iter().fold(
        EnumDefinition::new(qualify(prefix, definition.name())),
        |e, value| e.with_value(value.name(), value.number()),
    )
}

fn convert_service(service: &ServiceDescriptorProto) -> ServiceDefinition {
    service
        .method
        .iter()
        .fold(ServiceDefinition::new(service.name()), |s, method| {
            s.with_method(
                MethodDefinition::unary(method.name(), method.input_type(), method.output_type())
                    .with_streaming(method.client_streaming(), method.server_streaming()),
            )
        })
}

fn convert_type(field_type: Type) -> FieldType {
    match field_type {
        Type::Double => FieldType::Double,
        Type::Float => FieldType::Float,
        Type::Int64 => FieldType::Int64,
        Type::Uint64 => FieldType::Uint64,
        Type::Int32 => FieldType::Int32,
        Type::Fixed64 => FieldType::Fixed64,
        Type::Fixed32 => FieldType::Fixed32,
        Type::Bool => FieldType::Bool,
        Type::String => FieldType::String,
        Type::Group => FieldType::Group,
        Type::Message => FieldType::Message,
        Type::Bytes => FieldType::Bytes,
        Type::Uint32 => FieldType::Uint32,
        Type::Enum => FieldType::Enum,
        Type::Sfixed32 => FieldType::Sfixed32,
        Type::Sfixed64 => FieldType::Sfixed64,
        Type::Sint32 => FieldType::Sint32,
        Type::Sint64 => FieldType::Sint64,
    }
}

fn convert_label(label: Label) -> FieldLabel {
    match label {
        Label::Optional => FieldLabel::Optional,
        Label::Required => FieldLabel::Required,
        Label::Repeated => FieldLabel::Repeated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::{
        EnumValueDescriptorProto, FieldDescriptorProto, MethodDescriptorProto,
    };

    fn field(name: &str, number: i32, field_type: Type, label: Label) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(number),
            r#type: Some(field_type as i32),
            label: Some(label as i32),
            ..Default::default()
        }
    }

    fn hello_file() -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("hello.proto".to_string()),
            package: Some("helloworld".to_string()),
            message_type: vec![DescriptorProto {
                name: Some("Outer".to_string()),
                field: vec![field("ids", 1, Type::Int64, Label::Repeated)],
                nested_type: vec![DescriptorProto {
                    name: Some("Inner".to_string()),
                    field: vec![field("name", 1, Type::String, Label::Optional)],
                    ..Default::default()
                }],
                enum_type: vec![EnumDescriptorProto {
                    name: Some("Kind".to_string()),
                    value: vec![EnumValueDescriptorProto {
                        name: Some("KIND_UNKNOWN".to_string()),
                        number: Some(0),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            enum_type: vec![EnumDescriptorProto {
                name: Some("FOO".to_string()),
                ..Default::default()
            }],
            service: vec![ServiceDescriptorProto {
                name: Some("Greeter".to_string()),
                method: vec![MethodDescriptorProto {
                    name: Some("Watch".to_string()),
                    input_type: Some(".helloworld.Outer".to_string()),
                    output_type: Some(".helloworld.Outer.Inner".to_string()),
                    server_streaming: Some(true),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_file_identity_and_package() {
        let set = FileDescriptorSet {
            file: vec![hello_file()],
        };
        let snapshot = snapshot_from_descriptor_set(&set);
        let file = snapshot.file("hello.proto").unwrap();
        assert_eq!(file.package, "helloworld");
    }

    #[test]
    fn test_missing_package_is_empty() {
        let set = FileDescriptorSet {
            file: vec![FileDescriptorProto {
                name: Some("bare.proto".to_string()),
                ..Default::default()
            }],
        };
        let snapshot = snapshot_from_descriptor_set(&set);
        assert_eq!(snapshot.files[0].package, "");
    }

    #[test]
    fn test_nested_declarations_are_flattened() {
        let file = convert_file(&hello_file());

        let messages: Vec<&str> = file.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(messages, vec!["Outer", "Outer.Inner"]);

        let enums: Vec<&str> = file.enums.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(enums, vec!["FOO", "Outer.Kind"]);
    }

    #[test]
    fn test_field_type_and_label() {
        let file = convert_file(&hello_file());
        let ids = file.messages[0].field(1).unwrap();
        assert_eq!(ids.name, "ids");
        assert_eq!(ids.field_type, FieldType::Int64);
        assert_eq!(ids.label, FieldLabel::Repeated);
    }

    #[test]
    fn test_method_types_and_streaming() {
        let file = convert_file(&hello_file());
        let watch = &file.services[0].methods[0];
        assert_eq!(watch.input_type, ".helloworld.Outer");
        assert_eq!(watch.output_type, ".helloworld.Outer.Inner");
        assert!(!watch.client_streaming);
        assert!(watch.server_streaming);
    }

    #[test]
    fn test_request_keeps_only_files_to_generate() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["hello.proto".to_string()],
            proto_file: vec![
                FileDescriptorProto {
                    name: Some("google/protobuf/empty.proto".to_string()),
                    package: Some("google.protobuf".to_string()),
                    ..Default::default()
                },
                hello_file(),
            ],
            ..Default::default()
        };

        let snapshot = snapshot_from_request(&request);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.file("hello.proto").is_some());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_descriptor_set(&[0xff, 0xff, 0xff]).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_DESCRIPTOR");
    }

    #[test]
    fn test_decode_round_trip_through_bytes() {
        let set = FileDescriptorSet {
            file: vec![hello_file()],
        };
        let decoded = decode_descriptor_set(&set.encode_to_vec()).unwrap();
        assert_eq!(
            snapshot_from_descriptor_set(&decoded),
            snapshot_from_descriptor_set(&set)
        );
    }
}
