//! Network configuration.

use crate::dynamics::DEFAULT_CELLS_PER_CALL;
use crate::energy::{check_degree, DEFAULT_DEGREE};
use crate::error::{HopfieldError, Result};
use crate::noise::DEFAULT_STEEPNESS;
use serde::{Deserialize, Serialize};

/// Which update rule a session's `tick` applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// Stochastic synchronous sweep over Hebbian weights.
    #[default]
    Classical,
    /// Deterministic asynchronous pass over the rectified-polynomial energy.
    Dense,
}

/// Configuration for a Hopfield recall session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HopfieldConfig {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Exponent of the dense energy's rectified power.
    pub degree: u32,
    /// Neurons visited per asynchronous dense pass.
    pub cells_per_call: usize,
    /// tanh gain of the synchronous activation probability.
    pub steepness: f64,
    /// RNG seed for the synchronous rule; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Rule used by `RecallSession::tick`.
    pub rule: UpdateRule,
}

impl Default for HopfieldConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            degree: DEFAULT_DEGREE,
            cells_per_call: DEFAULT_CELLS_PER_CALL,
            steepness: DEFAULT_STEEPNESS,
            seed: None,
            rule: UpdateRule::Classical,
        }
    }
}

impl HopfieldConfig {
    /// Square `size × size` grid with defaults elsewhere.
    pub fn square(size: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            ..Self::default()
        }
    }

    /// Neuron count N.
    pub fn neurons(&self) -> usize {
        self.rows * self.cols
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(HopfieldError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.degree == 0 {
            return Err(HopfieldError::InvalidConfig(
                "degree must be at least 1".to_string(),
            ));
        }
        check_degree(self.degree, self.neurons(), 1)?;
        if self.cells_per_call == 0 {
            return Err(HopfieldError::InvalidConfig(
                "cells_per_call must be at least 1".to_string(),
            ));
        }
        if !self.steepness.is_finite() || self.steepness <= 0.0 {
            return Err(HopfieldError::InvalidConfig(format!(
                "steepness must be finite and positive, got {}",
                self.steepness
            )));
        }
        Ok(())
    }
}
