//! CodeGeneratorResponse assembly and serialization

use prost::Message;
use prost_types::compiler::{code_generator_response, CodeGeneratorResponse};
use protoc_gen_gateway_main_common::{GatewayFile, GeneratorError, Result};
use std::io::Write;

/// Name of the single file this plugin ever emits.
pub const OUTPUT_FILE_NAME: &str = "main.go";

/// Wrap a generated file in a single-entry response.
pub fn into_response(file: GatewayFile) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        file: vec![code_generator_response::File {
            name: Some(file.name),
            content: Some(file.content),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Serialize `response` to bytes.
pub fn encode_response(response: &CodeGeneratorResponse) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(response.encoded_len());
    response.encode(&mut buf)?;
    Ok(buf)
}

/// Serialize `response` and write it out in full.
pub fn write_response<W: Write>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()> {
    let buf = encode_response(response)?;
    writer.write_all(&buf).map_err(GeneratorError::OutputIo)?;

    tracing::debug!(bytes = buf.len(), "wrote code generator response");
    Ok(())
}
