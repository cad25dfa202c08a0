//! First-service selection

use prost_types::compiler::CodeGeneratorRequest;
use protoc_gen_gateway_main_common::ServiceBinding;

/// Select the service the gateway entrypoint is generated for.
///
/// Scans `request.proto_file` in order and stops at the first file that
/// declares a service; that file's first service, package, and file name
/// form the binding. Later files and later services in the winning file are
/// never inspected.
///
/// Returns `None` when no file declares a service, which callers treat as
/// "produce no output", not as an error.
pub fn select_first_service(request: &CodeGeneratorRequest) -> Option<ServiceBinding> {
    for proto_file in &request.proto_file {
        if let Some(service) = proto_file.service.first() {
            let binding = ServiceBinding {
                service_name: service.name().to_string(),
                package_name: proto_file.package().to_string(),
                proto_name: proto_file.name().to_string(),
            };

            tracing::debug!(
                service = %binding.service_name,
                package = %binding.package_name,
                proto = %binding.proto_name,
                "selected service"
            );

            return Some(binding);
        }
    }

    None
}
