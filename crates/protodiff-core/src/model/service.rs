use serde::{Deserialize, Serialize};

/// Service Definition - a named set of RPC methods
///
/// Method names are unique within a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Service name, relative to the file's package
    pub name: String,

    /// Method definitions in declaration order
    pub methods: Vec<MethodDefinition>,
}

impl ServiceDefinition {
    /// Create a new service with no methods
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Append a method (builder style)
    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }
}

/// A single RPC method
///
/// Type names are fully qualified exactly as the compiler emits them
/// (e.g. `.helloworld.FooRequest`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
}

impl MethodDefinition {
    /// Create a new unary method
    pub fn unary(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    /// Set the streaming flags (builder style)
    pub fn with_streaming(mut self, client_streaming: bool, server_streaming: bool) -> Self {
        self.client_streaming = client_streaming;
        self.server_streaming = server_streaming;
        self
    }
}
