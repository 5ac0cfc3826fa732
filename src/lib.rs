pub mod dialect;
pub mod generator;
pub mod model;
pub mod parser;
pub mod typemap;

use wasm_bindgen::prelude::*;

use dialect::Dialect;
use generator::{render_table, GeneratorConfig};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render one table of a PDM document as `mysql`, `oracle` or `java`.
#[wasm_bindgen(js_name = "pdmToArtifact")]
pub fn render_pdm(source: &str, table: &str, target: &str) -> Result<String, String> {
    let target: Dialect = target.parse().map_err(|e: dialect::UnknownDialect| e.to_string())?;
    render_table(source, table, target, GeneratorConfig::default()).map_err(|e| e.to_string())
}
