//! Energy models: the classical quadratic Hopfield form and the dense
//! rectified-polynomial form, behind a common `EnergyModel` trait.

use crate::error::{HopfieldError, Result};
use crate::grid::{dot, Grid};
use crate::patterns::PatternSet;
use crate::weights::WeightMatrix;

/// Default exponent of the dense energy's rectified power.
pub const DEFAULT_DEGREE: u32 = 3;

/// Trait implemented by any Hamiltonian that can return a scalar energy.
pub trait EnergyModel {
    /// Energy of `grid`; lower is more settled.
    fn energy(&self, grid: &Grid) -> Result<f64>;
}

/// Rectified power `F(x) = xᵈ` for `x > 0`, else `0`.
#[inline]
pub fn rectified_power(x: f64, degree: u32) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    match i32::try_from(degree) {
        Ok(d) => x.powi(d),
        Err(_) => x.powf(degree as f64),
    }
}

/// Reject a degree whose dense sums would leave the finite `f64` range.
///
/// The largest term is `Nᵈ` (a grid fully aligned with a pattern), and up to
/// `patterns` of them are summed. Past that bound energies become infinite
/// and the update rule compares `inf − inf`.
pub fn check_degree(degree: u32, neurons: usize, patterns: usize) -> Result<()> {
    let peak = rectified_power(neurons as f64, degree) * patterns.max(1) as f64;
    if !peak.is_finite() {
        return Err(HopfieldError::InvalidConfig(format!(
            "degree {degree} overflows dense energy for {neurons} neurons and {patterns} patterns"
        )));
    }
    Ok(())
}

/// Classical Hopfield energy:
///   E = −½ Σᵢⱼ Wᵢⱼ gᵢ gⱼ
pub fn classical_energy(grid: &Grid, weights: &WeightMatrix) -> Result<f64> {
    let n = weights.dim();
    if grid.len() != n {
        return Err(HopfieldError::shape(n, grid.len()));
    }
    let g = grid.as_slice();
    let mut e = 0.0_f64;
    for i in 0..n {
        let gi = g[i] as f64;
        for (j, &wij) in weights.row(i).iter().enumerate() {
            e += wij * gi * g[j] as f64;
        }
    }
    Ok(-0.5 * e)
}

/// Dense associative-memory energy:
///   E = −Σ_μ F(ξ^μ · g)
///
/// An empty pattern set gives `0` for any grid.
pub fn dense_energy(grid: &Grid, patterns: &PatternSet, degree: u32) -> Result<f64> {
    if patterns.is_empty() {
        return Ok(0.0);
    }
    if grid.len() != patterns.neurons() {
        return Err(HopfieldError::shape(patterns.neurons(), grid.len()));
    }
    check_degree(degree, patterns.neurons(), patterns.len())?;
    let total: f64 = patterns
        .vectors()
        .map(|p| rectified_power(dot(p, grid.as_slice()) as f64, degree))
        .sum();
    Ok(-total)
}

/// Classical model borrowing trained weights.
#[derive(Clone, Copy, Debug)]
pub struct Classical<'a> {
    pub weights: &'a WeightMatrix,
}

impl<'a> Classical<'a> {
    pub fn new(weights: &'a WeightMatrix) -> Self {
        Self { weights }
    }
}

impl EnergyModel for Classical<'_> {
    fn energy(&self, grid: &Grid) -> Result<f64> {
        classical_energy(grid, self.weights)
    }
}

/// Dense model borrowing the stored patterns directly; it has no pairwise
/// weight equivalent.
#[derive(Clone, Copy, Debug)]
pub struct Dense<'a> {
    pub patterns: &'a PatternSet,
    pub degree: u32,
}

impl<'a> Dense<'a> {
    pub fn new(patterns: &'a PatternSet, degree: u32) -> Self {
        Self { patterns, degree }
    }
}

impl EnergyModel for Dense<'_> {
    fn energy(&self, grid: &Grid) -> Result<f64> {
        dense_energy(grid, self.patterns, self.degree)
    }
}
