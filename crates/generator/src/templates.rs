//! Template loading and management

use protoc_gen_gateway_main_common::{GeneratorError, Result};
use tera::Tera;

/// Name the gateway template is registered and rendered under.
pub const TEMPLATE_NAME: &str = "main.go";

/// The gateway entrypoint template.
///
/// The program shape is fixed. Rendering substitutes exactly three values:
/// `proto_name` in the header comment, `package_name` qualifying the
/// registration call, and `service_name` inside the registration function
/// identifier.
pub const GATEWAY_TEMPLATE: &str = include_str!("../templates/main.go.tera");

/// Build a `Tera` instance holding `source` as the gateway template.
pub fn load_template(source: &str) -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(TEMPLATE_NAME, source)
        .map_err(|e| GeneratorError::Render(format!("failed to load gateway template: {}", e)))?;

    Ok(tera)
}
