//! CodeGeneratorRequest decoding

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use protoc_gen_gateway_main_common::{GeneratorError, Result};
use std::io::Read;

/// Read a serialized `CodeGeneratorRequest` from `reader`.
///
/// The plugin protocol frames exactly one message per direction with no
/// length prefix, so the stream is buffered to exhaustion and the message
/// ends where the stream does.
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(GeneratorError::InputIo)?;

    decode_request(&buf)
}

/// Decode a fully buffered `CodeGeneratorRequest`.
pub fn decode_request(buf: &[u8]) -> Result<CodeGeneratorRequest> {
    let request = CodeGeneratorRequest::decode(buf)?;

    tracing::debug!(
        bytes = buf.len(),
        proto_files = request.proto_file.len(),
        parameter = request.parameter(),
        "decoded code generator request"
    );

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::FileDescriptorProto;
    use std::io;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }
    }

    #[test]
    fn test_decode_round_trips_an_encoded_request() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["svc.proto".to_string()],
            proto_file: vec![FileDescriptorProto {
                name: Some("svc.proto".to_string()),
                package: Some("petstore".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let decoded = decode_request(&request.encode_to_vec()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_decode_rejects_non_protocol_bytes() {
        let result = decode_request(b"this is not a protobuf message");
        assert!(matches!(result, Err(GeneratorError::Decode(_))));
    }

    #[test]
    fn test_read_reports_input_io_failure() {
        let result = read_request(FailingReader);
        assert!(matches!(result, Err(GeneratorError::InputIo(_))));
    }

    #[test]
    fn test_read_consumes_reader_to_exhaustion() {
        let request = CodeGeneratorRequest::default();
        let bytes = request.encode_to_vec();

        let decoded = read_request(bytes.as_slice()).unwrap();
        assert_eq!(decoded, request);
    }
}
