//! Hopfield network WASM bindings
//!
//! One `HopfieldNetwork` per drawing grid. Grids cross the boundary as flat
//! row-major `Int8Array`s of `±1`.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use ruvector_hopfield::{
    classical_energy, dense_energy, synchronous_update, train, DenseUpdater, Grid,
    HopfieldConfig, HopfieldError, PatternSet, WeightMatrix,
};
use wasm_bindgen::prelude::*;

/// Largest integer a JS number represents exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_SEED: f64 = 9_007_199_254_740_991.0;

fn to_js(err: HopfieldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// `null`/`undefined` mean "no seed"; anything else must be a non-negative
/// safe integer.
fn parse_seed(seed: &JsValue) -> Result<Option<u64>, JsValue> {
    if seed.is_undefined() || seed.is_null() {
        return Ok(None);
    }
    let value = seed
        .as_f64()
        .ok_or_else(|| JsValue::from_str("seed must be a number, null, or undefined"))?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_SAFE_SEED {
        return Err(JsValue::from_str(&format!(
            "seed must be a non-negative integer, got {value}"
        )));
    }
    Ok(Some(value as u64))
}

/// Classical and dense associative memory over a fixed-size grid.
#[wasm_bindgen]
pub struct HopfieldNetwork {
    config: HopfieldConfig,
    patterns: PatternSet,
    weights: WeightMatrix,
    updater: DenseUpdater,
    rng: SmallRng,
}

#[wasm_bindgen]
impl HopfieldNetwork {
    /// Create a network for `rows × cols` grids.
    ///
    /// `seed` may be a non-negative integer, `null` or `undefined`; without
    /// one the synchronous rule draws from browser entropy. Negative JS
    /// numbers passed as `degree` wrap to huge values and are rejected by
    /// config validation.
    #[wasm_bindgen(constructor)]
    pub fn new(
        rows: usize,
        cols: usize,
        degree: u32,
        cells_per_call: usize,
        seed: JsValue,
    ) -> Result<HopfieldNetwork, JsValue> {
        let seed = parse_seed(&seed)?;
        let config = HopfieldConfig {
            rows,
            cols,
            degree,
            cells_per_call,
            seed,
            ..HopfieldConfig::default()
        };
        config.validate().map_err(to_js)?;

        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Ok(Self {
            patterns: PatternSet::new(rows, cols),
            weights: WeightMatrix::zeros(config.neurons()),
            updater: DenseUpdater::new(cells_per_call, degree),
            config,
            rng,
        })
    }

    /// Store a flattened `±1` pattern and retrain the weights.
    pub fn add_pattern(&mut self, name: &str, cells: &[i8]) -> Result<(), JsValue> {
        let grid = self.grid(cells)?;
        self.patterns.push(name, grid).map_err(to_js)?;
        self.weights = train(&self.patterns);
        Ok(())
    }

    /// Store a pattern given as a nested JSON array (a letter file's contents).
    pub fn add_pattern_json(&mut self, name: &str, json: &str) -> Result<(), JsValue> {
        self.patterns.push_json(name, json).map_err(to_js)?;
        self.weights = train(&self.patterns);
        Ok(())
    }

    /// Drop every stored pattern.
    pub fn clear_patterns(&mut self) {
        self.patterns = PatternSet::new(self.config.rows, self.config.cols);
        self.weights = WeightMatrix::zeros(self.config.neurons());
    }

    #[wasm_bindgen(getter)]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    #[wasm_bindgen(getter)]
    pub fn neurons(&self) -> usize {
        self.config.neurons()
    }

    /// Trained weights as a flat row-major `Float64Array` of N² entries.
    pub fn weights(&self) -> js_sys::Float64Array {
        js_sys::Float64Array::from(self.weights.as_slice())
    }

    /// Classical quadratic energy of `grid`.
    pub fn classical_energy(&self, grid: &[i8]) -> Result<f64, JsValue> {
        let grid = self.grid(grid)?;
        classical_energy(&grid, &self.weights).map_err(to_js)
    }

    /// Dense rectified-polynomial energy of `grid`.
    pub fn dense_energy(&self, grid: &[i8]) -> Result<f64, JsValue> {
        let grid = self.grid(grid)?;
        dense_energy(&grid, &self.patterns, self.config.degree).map_err(to_js)
    }

    /// One stochastic synchronous sweep; returns the new grid.
    pub fn update(&mut self, grid: &[i8]) -> Result<Vec<i8>, JsValue> {
        let grid = self.grid(grid)?;
        let next = synchronous_update(&grid, &self.weights, self.config.steepness, &mut self.rng)
            .map_err(to_js)?;
        Ok(next.into_vec())
    }

    /// One asynchronous dense pass of `cells_per_call` neurons; returns the new grid.
    pub fn dense_update(&mut self, grid: &[i8]) -> Result<Vec<i8>, JsValue> {
        let grid = self.grid(grid)?;
        let next = self.updater.update_pass(&grid, &self.patterns).map_err(to_js)?;
        Ok(next.into_vec())
    }

    /// Index of the next neuron the dense pass will visit.
    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> usize {
        self.updater.cursor().position()
    }

    pub fn reset_cursor(&mut self) {
        self.updater.reset();
    }
}

impl HopfieldNetwork {
    fn grid(&self, cells: &[i8]) -> Result<Grid, JsValue> {
        Grid::new(self.config.rows, self.config.cols, cells.to_vec()).map_err(to_js)
    }
}
