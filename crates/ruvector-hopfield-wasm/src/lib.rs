//! # RuVector Hopfield WASM
//!
//! Browser bindings for `ruvector-hopfield`: draw on a grid, then let a
//! classical or dense associative memory pull the drawing toward the closest
//! stored letter.
//!
//! ## Example Usage (JavaScript)
//!
//! ```javascript
//! import init, { HopfieldNetwork, letter_files } from 'ruvector-hopfield-wasm';
//!
//! await init();
//!
//! // 8x8 grid, cubic dense energy, 8 neurons per dense pass, seeded RNG
//! const net = new HopfieldNetwork(8, 8, 3, 8, 42);
//! for (const file of letter_files('A-C')) {
//!   const json = await (await fetch(`/letters/${file}`)).text();
//!   net.add_pattern_json(file.replace('.json', ''), json);
//! }
//!
//! let grid = new Int8Array(64).fill(-1);
//! grid = net.update(grid);          // classical stochastic sweep
//! grid = net.dense_update(grid);    // dense asynchronous pass
//! console.log(net.classical_energy(grid), net.dense_energy(grid));
//! ```

use ruvector_hopfield::PatternSelection;
use wasm_bindgen::prelude::*;

pub mod network;

pub use network::HopfieldNetwork;

/// Initialize the WASM module with panic hook
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the version of the crate
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Letter file names for a selection label (`"A-C"` or `"A-G"`).
#[wasm_bindgen]
pub fn letter_files(selection: &str) -> Result<JsValue, JsValue> {
    let selection = PatternSelection::from_label(selection)
        .ok_or_else(|| JsValue::from_str(&format!("unknown selection: {selection}")))?;
    serde_wasm_bindgen::to_value(&selection.file_names())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
