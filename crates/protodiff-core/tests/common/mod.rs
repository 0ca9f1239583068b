use protodiff_core::{
    EnumDefinition, FieldDefinition, FieldType, FileDefinition, MessageDefinition,
    MethodDefinition, SchemaSnapshot, ServiceDefinition,
};

/// Wrap a single `test.proto` file in a snapshot
#[allow(dead_code)]
pub fn snapshot_of(file: FileDefinition) -> SchemaSnapshot {
    SchemaSnapshot::new().with_file(file)
}

/// An empty `test.proto` in package `helloworld`
#[allow(dead_code)]
pub fn hello_file() -> FileDefinition {
    FileDefinition::new("test.proto", "helloworld")
}

/// `message HelloRequest { string name = 1; }`
#[allow(dead_code)]
pub fn hello_request() -> MessageDefinition {
    MessageDefinition::new("HelloRequest").with_field(FieldDefinition::optional(
        "name",
        1,
        FieldType::String,
    ))
}

/// `enum FOO { bar = 0; bat = 1; }`
#[allow(dead_code)]
pub fn foo_enum() -> EnumDefinition {
    EnumDefinition::new("FOO")
        .with_value("bar", 0)
        .with_value("bat", 1)
}

/// `service Foo { rpc Bar(Empty) returns (Empty); }`
#[allow(dead_code)]
pub fn foo_service() -> ServiceDefinition {
    ServiceDefinition::new("Foo").with_method(MethodDefinition::unary(
        "Bar",
        ".helloworld.Empty",
        ".helloworld.Empty",
    ))
}

/// A file that exercises every entity kind
#[allow(dead_code)]
pub fn greeter_file() -> FileDefinition {
    hello_file()
        .with_enum(foo_enum())
        .with_service(
            ServiceDefinition::new("Greeter")
                .with_method(MethodDefinition::unary(
                    "SayHello",
                    ".helloworld.HelloRequest",
                    ".helloworld.HelloReply",
                ))
                .with_method(
                    MethodDefinition::unary(
                        "Watch",
                        ".helloworld.HelloRequest",
                        ".helloworld.HelloReply",
                    )
                    .with_streaming(false, true),
                ),
        )
        .with_message(hello_request())
        .with_message(
            MessageDefinition::new("HelloReply")
                .with_field(FieldDefinition::optional("message", 1, FieldType::String))
                .with_field(FieldDefinition::repeated("tags", 2, FieldType::String)),
        )
}

/// Render every problem of a diff as its one-line description
#[allow(dead_code)]
pub fn rendered(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Vec<String> {
    protodiff_core::compute_diff(previous, current)
        .iter()
        .map(|p| p.to_string())
        .collect()
}
