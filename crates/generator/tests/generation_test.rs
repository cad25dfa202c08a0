//! Integration tests for gateway entrypoint generation

use protoc_gen_gateway_main_common::ServiceBinding;
use protoc_gen_gateway_main_generator::{format_source, GatewayGenerator, OUTPUT_FILE_NAME};

fn petstore_binding() -> ServiceBinding {
    ServiceBinding {
        service_name: "Pet".to_string(),
        package_name: "petstore".to_string(),
        proto_name: "svc.proto".to_string(),
    }
}

#[test]
fn test_petstore_entrypoint_end_to_end() {
    let generator = GatewayGenerator::new().unwrap();
    let file = generator.generate(&petstore_binding()).unwrap();

    assert_eq!(file.name, OUTPUT_FILE_NAME);

    // Header identifies the originating proto file.
    assert!(file.content.contains("// source: svc.proto"));

    // The registration call is qualified by the proto package and derived
    // from the service name.
    assert!(file
        .content
        .contains("petstore.RegisterPetHandlerFromEndpoint(ctx, mux, tgtAddr, opts)"));

    // Listener defaults, overridable through the environment.
    assert!(file.content.contains("port := \"8080\""));
    assert!(file.content.contains("tgtAddr := \"localhost:50051\""));
    assert!(file.content.contains("os.LookupEnv(\"PORT\")"));
    assert!(file.content.contains("os.LookupEnv(\"TARGET_ADDR\")"));

    assert!(file.content.starts_with("// Code initially generated by"));
    assert!(file.content.contains("package main"));
    assert!(file.content.contains("http.ListenAndServe(\":\"+port, mux)"));
}

#[test]
fn test_generated_content_is_already_canonical() {
    let generator = GatewayGenerator::new().unwrap();
    let file = generator.generate(&petstore_binding()).unwrap();

    assert_eq!(format_source(&file.content).unwrap(), file.content);
}

#[test]
fn test_same_binding_generates_identical_content() {
    let generator = GatewayGenerator::new().unwrap();

    let first = generator.generate(&petstore_binding()).unwrap();
    let second = generator.generate(&petstore_binding()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_alternate_template_is_rendered_instead() {
    let generator =
        GatewayGenerator::with_template("// source: {{ proto_name }}\npackage main\n").unwrap();

    let file = generator.generate(&petstore_binding()).unwrap();
    assert_eq!(file.content, "// source: svc.proto\npackage main\n");
}

#[test]
fn test_empty_package_is_substituted_verbatim() {
    let generator = GatewayGenerator::new().unwrap();
    let binding = ServiceBinding {
        package_name: String::new(),
        ..petstore_binding()
    };

    let file = generator.generate(&binding).unwrap();
    assert!(file
        .content
        .contains("err := .RegisterPetHandlerFromEndpoint(ctx, mux, tgtAddr, opts)"));
}
