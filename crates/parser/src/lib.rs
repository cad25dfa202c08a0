//! Request-side pipeline for the gateway-main protoc plugin
//!
//! This crate handles decoding of the compiler's `CodeGeneratorRequest` and
//! selection of the single service the gateway entrypoint is generated for.
//!
//! ## Selection Strategy
//!
//! protoc hands the plugin every proto file in the compilation, but one
//! invocation scaffolds exactly one gateway entrypoint. Files are visited in
//! request order and the first service declared in the first file that
//! declares any wins; everything after that point is left untouched.

mod request;
mod select;

pub use request::{decode_request, read_request};
pub use select::select_first_service;
