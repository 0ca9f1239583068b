//! Capture shim
//!
//! When `protoc` runs protodiff as a plugin (`--plugin=protoc-gen-echo=...`)
//! the request it sends on stdin is the fully resolved descriptor tree. The
//! shim hands that request back to the compiler as a single generated file,
//! which the compiler then writes into the `--echo_out` directory.
//!
//! Generated file content is a protobuf `string`, so the raw request bytes
//! are stored base64 encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use prost::Message;
use prost_types::compiler::code_generator_response::File;
use prost_types::compiler::CodeGeneratorResponse;

use protodiff_core::errors::{ExError, ExErrorKind};

use crate::descriptor::decode_request;
use crate::errors::{decode_failed, Result};

/// Name of the file the shim asks the compiler to write
pub const CAPTURE_FILE_NAME: &str = "codegen.req";

/// Turn a plugin request into a response that captures it verbatim
///
/// # Errors
///
/// - `InvalidDescriptor` - `request` is not a `CodeGeneratorRequest`
/// - `InvalidInput` - the request lists no files to generate
pub fn run_echo(request: &[u8]) -> Result<Vec<u8>> {
    let decoded = decode_request(request)?;
    if decoded.file_to_generate.is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("echo")
            .with_message("no files to generate"));
    }

    let response = CodeGeneratorResponse {
        file: vec![File {
            name: Some(CAPTURE_FILE_NAME.to_string()),
            content: Some(STANDARD.encode(request)),
            ..Default::default()
        }],
        ..Default::default()
    };

    Ok(response.encode_to_vec())
}

/// Recover the raw request bytes from a capture file's content
pub fn decode_capture(content: &[u8]) -> Result<Vec<u8>> {
    let trimmed: Vec<u8> = content
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(trimmed)
        .map_err(|e| decode_failed("capture", e))
}
