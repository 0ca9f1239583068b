//! Echo command
//!
//! Usage: protoc --plugin=protoc-gen-echo=$(which protodiff) --echo_out=DIR FILE.proto
//!
//! Reads a `CodeGeneratorRequest` from stdin and writes the capturing
//! `CodeGeneratorResponse` to stdout. Nothing else may be written to stdout.

use std::io::{Read, Write};

use protodiff_snapshot::errors::io_error;
use protodiff_snapshot::run_echo;

/// Execute echo command
pub fn execute() -> Result<(), Box<dyn std::error::Error>> {
    let mut request = Vec::new();
    std::io::stdin()
        .read_to_end(&mut request)
        .map_err(|e| io_error("read_request", e))?;

    let response = run_echo(&request)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response)
        .and_then(|_| stdout.flush())
        .map_err(|e| io_error("write_response", e))?;

    Ok(())
}
