//! Recall observables: magnetisation, pattern overlap, Hamming distance and
//! energy traces.

use crate::grid::{dot, Grid};
use crate::patterns::PatternSet;

/// Mean magnetisation: m = (1/n) Σᵢ gᵢ ∈ [−1, 1].
pub fn magnetisation(grid: &Grid) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    grid.as_slice().iter().map(|&c| c as f64).sum::<f64>() / grid.len() as f64
}

/// Pattern overlap (Hopfield order parameter):
///   m_μ = (1/n) Σᵢ ξᵢ^μ gᵢ
///
/// Returns `None` if lengths differ.
pub fn overlap(grid: &Grid, pattern: &Grid) -> Option<f64> {
    let n = grid.len();
    if pattern.len() != n || n == 0 {
        return None;
    }
    Some(dot(grid.as_slice(), pattern.as_slice()) as f64 / n as f64)
}

/// Number of differing cells, or `None` if lengths differ.
pub fn hamming_distance(a: &Grid, b: &Grid) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    Some(
        a.as_slice()
            .iter()
            .zip(b.as_slice())
            .filter(|(x, y)| x != y)
            .count(),
    )
}

/// Stored pattern with the largest overlap with `grid`, as `(name, overlap)`.
///
/// Ties keep the earliest pattern. `None` for an empty set or a size mismatch.
pub fn closest_pattern<'a>(grid: &Grid, patterns: &'a PatternSet) -> Option<(&'a str, f64)> {
    let mut best: Option<(&'a str, f64)> = None;
    for p in patterns.iter() {
        let m = overlap(grid, &p.grid)?;
        if best.map_or(true, |(_, b)| m > b) {
            best = Some((p.name.as_str(), m));
        }
    }
    best
}

/// Energies recorded over a run.
#[derive(Default, Debug, Clone)]
pub struct Trace {
    /// Energy samples (one per recorded step).
    pub energies: Vec<f64>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, energy: f64) {
        self.energies.push(energy);
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Mean energy over all recorded steps.
    pub fn mean_energy(&self) -> f64 {
        if self.energies.is_empty() {
            return 0.0;
        }
        self.energies.iter().sum::<f64>() / self.energies.len() as f64
    }

    pub fn last(&self) -> Option<f64> {
        self.energies.last().copied()
    }

    /// Lowest energy seen.
    pub fn min_energy(&self) -> Option<f64> {
        self.energies.iter().copied().reduce(f64::min)
    }
}
