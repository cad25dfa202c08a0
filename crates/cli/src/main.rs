//! protoc plugin entrypoint
//!
//! protoc hands the plugin a serialized `CodeGeneratorRequest` on stdin and
//! consumes the `CodeGeneratorResponse` from stdout, so stdout carries
//! nothing but the response and all diagnostics go to stderr. The plugin
//! takes no command-line arguments.
//!
//! A request that declares no service is a successful no-op: the process
//! exits 0 without writing a single byte. Everything else that goes wrong
//! is fatal and reported exactly once.

use protoc_gen_gateway_main_common::Result;
use protoc_gen_gateway_main_generator::{into_response, write_response, GatewayGenerator};
use protoc_gen_gateway_main_parser::{read_request, select_first_service};
use std::io::{Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// What one plugin invocation did.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// A gateway entrypoint was generated and written.
    Generated,
    /// No service in the request; nothing was written.
    NoService,
}

fn main() {
    init_tracing();

    match run(std::io::stdin().lock(), std::io::stdout().lock()) {
        Ok(Outcome::Generated) => tracing::debug!("gateway entrypoint generated"),
        Ok(Outcome::NoService) => tracing::debug!("no service in request, nothing generated"),
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    }
}

/// Run the whole pipeline over one request.
///
/// Decode, select, render, format, encode. Output is written only on full
/// success, so a failing stage can never leave a partial response behind.
fn run<R: Read, W: Write>(input: R, output: W) -> Result<Outcome> {
    let request = read_request(input)?;

    let Some(binding) = select_first_service(&request) else {
        return Ok(Outcome::NoService);
    };

    let generator = GatewayGenerator::new()?;
    let file = generator.generate(&binding)?;

    write_response(output, &into_response(file))?;
    Ok(Outcome::Generated)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
