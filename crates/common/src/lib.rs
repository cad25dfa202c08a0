//! Common types for the gateway-main protoc plugin
//!
//! This crate contains the shared data structures and error types used
//! across the parser, generator, and plugin driver.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a plugin run.
///
/// Every variant is fatal: the driver reports it once and exits without
/// writing a response.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("request read error: {0}")]
    InputIo(#[source] std::io::Error),

    #[error("request decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("template render error: {0}")]
    Render(String),

    #[error("source format error: {0}")]
    Format(String),

    #[error("response encode error: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("response write error: {0}")]
    OutputIo(#[source] std::io::Error),
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// The service a gateway entrypoint is generated for, together with the
/// package and proto file that declare it.
///
/// All three fields come from the same `FileDescriptorProto`. A request
/// without any service yields no binding at all, never a partial one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Service name as declared in the proto file (e.g. "Pet")
    pub service_name: String,
    /// Package of the declaring file (e.g. "petstore")
    pub package_name: String,
    /// Name of the declaring proto file (e.g. "svc.proto")
    pub proto_name: String,
}

/// A generated source file: output name plus formatted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFile {
    pub name: String,
    pub content: String,
}
