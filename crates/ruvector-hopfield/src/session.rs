//! Recall session: one independent simulation owning its grid, patterns,
//! cached weights, dense cursor and RNG.

use crate::config::{HopfieldConfig, UpdateRule};
use crate::dynamics::{dense_update_pass, synchronous_update, UpdateCursor};
use crate::energy::{classical_energy, dense_energy};
use crate::error::{HopfieldError, Result};
use crate::grid::{Grid, UP};
use crate::metrics::{closest_pattern, Trace};
use crate::patterns::PatternSet;
use crate::weights::{train, WeightMatrix};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// A single simulation session.
///
/// Weights are retrained whenever the pattern set is replaced and are
/// otherwise reused across ticks. Sessions share no state, so one session per
/// grid is safe to run alongside others.
#[derive(Debug, Clone)]
pub struct RecallSession {
    config: HopfieldConfig,
    patterns: PatternSet,
    weights: WeightMatrix,
    grid: Grid,
    cursor: UpdateCursor,
    rng: StdRng,
}

impl RecallSession {
    /// Start a session on a blank grid.
    pub fn new(config: HopfieldConfig, patterns: PatternSet) -> Result<Self> {
        config.validate()?;
        check_dims(&config, &patterns)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let weights = train(&patterns);
        let grid = Grid::cleared(config.rows, config.cols);
        Ok(Self {
            config,
            patterns,
            weights,
            grid,
            cursor: UpdateCursor::new(),
            rng,
        })
    }

    pub fn config(&self) -> &HopfieldConfig {
        &self.config
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.weights
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> UpdateCursor {
        self.cursor
    }

    /// Replace the live grid; its dimensions must match the session's.
    pub fn set_grid(&mut self, grid: Grid) -> Result<()> {
        if grid.dims() != (self.config.rows, self.config.cols) {
            return Err(HopfieldError::shape(self.config.neurons(), grid.len()));
        }
        self.grid = grid;
        Ok(())
    }

    /// Blank the grid.
    pub fn clear(&mut self) {
        self.grid = Grid::cleared(self.config.rows, self.config.cols);
    }

    /// Activate one cell, as a pen stroke does.
    pub fn draw(&mut self, row: usize, col: usize) -> Result<()> {
        self.grid.set(row, col, UP)
    }

    /// Swap in a new pattern set and retrain the weights.
    pub fn set_patterns(&mut self, patterns: PatternSet) -> Result<()> {
        check_dims(&self.config, &patterns)?;
        self.weights = train(&patterns);
        self.patterns = patterns;
        debug!(patterns = self.patterns.len(), "session retrained");
        Ok(())
    }

    /// Apply one step of the configured rule.
    pub fn tick(&mut self) -> Result<&Grid> {
        match self.config.rule {
            UpdateRule::Classical => self.step_classical(),
            UpdateRule::Dense => self.step_dense(),
        }
    }

    /// One stochastic synchronous sweep.
    pub fn step_classical(&mut self) -> Result<&Grid> {
        self.grid = synchronous_update(
            &self.grid,
            &self.weights,
            self.config.steepness,
            &mut self.rng,
        )?;
        Ok(&self.grid)
    }

    /// One asynchronous dense pass of `cells_per_call` neurons.
    pub fn step_dense(&mut self) -> Result<&Grid> {
        let (grid, cursor) = dense_update_pass(
            &self.grid,
            &self.patterns,
            self.cursor,
            self.config.cells_per_call,
            self.config.degree,
        )?;
        self.grid = grid;
        self.cursor = cursor;
        Ok(&self.grid)
    }

    /// Run `ticks` steps, recording the configured energy after each.
    pub fn run(&mut self, ticks: usize) -> Result<Trace> {
        let mut trace = Trace::new();
        for _ in 0..ticks {
            self.tick()?;
            trace.push(self.energy()?);
        }
        Ok(trace)
    }

    /// Energy under the configured rule.
    pub fn energy(&self) -> Result<f64> {
        match self.config.rule {
            UpdateRule::Classical => self.classical_energy(),
            UpdateRule::Dense => self.dense_energy(),
        }
    }

    pub fn classical_energy(&self) -> Result<f64> {
        classical_energy(&self.grid, &self.weights)
    }

    pub fn dense_energy(&self) -> Result<f64> {
        dense_energy(&self.grid, &self.patterns, self.config.degree)
    }

    pub fn reset_cursor(&mut self) {
        self.cursor.reset();
    }

    /// Stored pattern the grid currently resembles most.
    pub fn recalled(&self) -> Option<(&str, f64)> {
        closest_pattern(&self.grid, &self.patterns)
    }

    /// `true` when the grid equals one of the stored patterns exactly.
    pub fn converged(&self) -> bool {
        self.patterns.iter().any(|p| p.grid == self.grid)
    }
}

fn check_dims(config: &HopfieldConfig, patterns: &PatternSet) -> Result<()> {
    if patterns.dims() != (config.rows, config.cols) {
        return Err(HopfieldError::shape(config.neurons(), patterns.neurons()));
    }
    Ok(())
}
