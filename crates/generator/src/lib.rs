//! Gateway entrypoint generation
//!
//! This crate renders the fixed `main.go` gateway template around a selected
//! service, canonicalizes the result, and assembles the compiler response.
//! The generated program proxies HTTP+JSON to the gRPC service it was
//! generated for, listening on `PORT` (default 8080) and dialing
//! `TARGET_ADDR` (default localhost:50051).

mod gofmt;
mod response;
mod templates;

pub use gofmt::{format_source, SyntaxError};
pub use response::{encode_response, into_response, write_response, OUTPUT_FILE_NAME};
pub use templates::{GATEWAY_TEMPLATE, TEMPLATE_NAME};

use protoc_gen_gateway_main_common::{GatewayFile, GeneratorError, Result, ServiceBinding};
use tera::Tera;

/// Gateway entrypoint generator
///
/// Holds the template it renders. [`GatewayGenerator::new`] uses the
/// built-in [`GATEWAY_TEMPLATE`]; an alternate source can be injected with
/// [`GatewayGenerator::with_template`].
pub struct GatewayGenerator {
    tera: Tera,
}

impl GatewayGenerator {
    /// Create a generator rendering the built-in gateway template.
    pub fn new() -> Result<Self> {
        Self::with_template(templates::GATEWAY_TEMPLATE)
    }

    /// Create a generator rendering `source` instead of the built-in
    /// template.
    pub fn with_template(source: &str) -> Result<Self> {
        let tera = templates::load_template(source)?;
        Ok(Self { tera })
    }

    /// Render the raw gateway source for `binding`.
    ///
    /// Substitution is verbatim. Whether the substituted names form legal Go
    /// is not checked here; the formatting stage rejects output whose names
    /// broke the template's syntax.
    pub fn render(&self, binding: &ServiceBinding) -> Result<String> {
        let mut context = tera::Context::new();
        context.insert("proto_name", &binding.proto_name);
        context.insert("package_name", &binding.package_name);
        context.insert("service_name", &binding.service_name);

        self.tera
            .render(templates::TEMPLATE_NAME, &context)
            .map_err(|e| GeneratorError::Render(format!("template execution failed: {}", e)))
    }

    /// Render, format, and wrap the gateway entrypoint for `binding`.
    pub fn generate(&self, binding: &ServiceBinding) -> Result<GatewayFile> {
        let raw = self.render(binding)?;
        tracing::debug!(bytes = raw.len(), "rendered gateway source");

        let formatted = gofmt::format_source(&raw)
            .map_err(|e| GeneratorError::Format(e.to_string()))?;

        Ok(GatewayFile {
            name: response::OUTPUT_FILE_NAME.to_string(),
            content: formatted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> ServiceBinding {
        ServiceBinding {
            service_name: "Greeter".to_string(),
            package_name: "hello".to_string(),
            proto_name: "hello.proto".to_string(),
        }
    }

    #[test]
    fn test_generator_creation() {
        assert!(GatewayGenerator::new().is_ok());
    }

    #[test]
    fn test_render_substitutes_all_three_values() {
        let generator = GatewayGenerator::new().unwrap();
        let raw = generator.render(&binding()).unwrap();

        assert!(raw.contains("// source: hello.proto"));
        assert!(raw.contains("hello.RegisterGreeterHandlerFromEndpoint(ctx, mux, tgtAddr, opts)"));
    }

    #[test]
    fn test_generate_names_the_output_main_go() {
        let generator = GatewayGenerator::new().unwrap();
        let file = generator.generate(&binding()).unwrap();

        assert_eq!(file.name, OUTPUT_FILE_NAME);
    }

    #[test]
    fn test_template_missing_a_variable_fails_render() {
        let generator = GatewayGenerator::with_template("package {{ missing }}\n").unwrap();

        let result = generator.render(&binding());
        assert!(matches!(result, Err(GeneratorError::Render(_))));
    }

    #[test]
    fn test_substituted_name_breaking_syntax_fails_format() {
        let generator = GatewayGenerator::new().unwrap();
        let broken = ServiceBinding {
            service_name: "Pet\"".to_string(),
            ..binding()
        };

        let result = generator.generate(&broken);
        assert!(matches!(result, Err(GeneratorError::Format(_))));
    }
}
