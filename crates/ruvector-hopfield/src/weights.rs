//! Hebbian (outer-product) weight training for the classical network.

use crate::error::{HopfieldError, Result};
use crate::grid::check_spin;
use crate::patterns::PatternSet;
use tracing::debug;

/// Dense `n×n` coupling matrix, row-major.
///
/// Matrices produced by [`train`] are symmetric with a zero diagonal.
/// Matrices built with [`WeightMatrix::from_rows`] are only checked for
/// squareness.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix {
    n: usize,
    w: Vec<f64>,
}

impl WeightMatrix {
    /// All-zero matrix for `n` neurons.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            w: vec![0.0; n * n],
        }
    }

    /// Build from nested rows, e.g. weights handed back by a caller.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut w = Vec::with_capacity(n * n);
        for row in rows {
            if row.len() != n {
                return Err(HopfieldError::NonSquareWeights {
                    rows: n,
                    cols: row.len(),
                });
            }
            w.extend(row);
        }
        Ok(Self { n, w })
    }

    /// Dimension n.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.w[i * self.n + j]
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.w[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.w
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n).map(|i| self.row(i).to_vec()).collect()
    }

    /// `W[i][j] == W[j][i]` within `tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|i| {
            ((i + 1)..self.n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }

    /// No autapses.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i) == 0.0)
    }
}

/// Train classical Hopfield weights from a pattern set.
///
/// `W = (Σ_p p pᵀ) / N` with the diagonal zeroed. The divisor is the neuron
/// count N, not the number of patterns. An empty set yields the zero matrix.
pub fn train(patterns: &PatternSet) -> WeightMatrix {
    let n = patterns.neurons();
    let weights = hebbian(n, patterns.vectors());
    debug!(patterns = patterns.len(), neurons = n, "trained hebbian weights");
    weights
}

/// Train from raw flattened vectors, validating each one.
///
/// Vectors whose length is not `n` are rejected with
/// [`HopfieldError::ShapeMismatch`]; cells outside `{-1, +1}` with
/// [`HopfieldError::InvalidCellValue`].
pub fn train_vectors(n: usize, patterns: &[Vec<i8>]) -> Result<WeightMatrix> {
    for pat in patterns {
        if pat.len() != n {
            return Err(HopfieldError::shape(n, pat.len()));
        }
        for (index, &value) in pat.iter().enumerate() {
            check_spin(index, value as f64)?;
        }
    }
    let weights = hebbian(n, patterns.iter().map(Vec::as_slice));
    debug!(patterns = patterns.len(), neurons = n, "trained hebbian weights");
    Ok(weights)
}

fn hebbian<'a>(n: usize, patterns: impl Iterator<Item = &'a [i8]>) -> WeightMatrix {
    let mut acc = vec![0.0f64; n * n];
    for pat in patterns {
        for i in 0..n {
            let pi = pat[i] as f64;
            let row = &mut acc[i * n..(i + 1) * n];
            for (k, cell) in row.iter_mut().enumerate() {
                *cell += pi * pat[k] as f64;
            }
        }
    }
    let scale = n as f64;
    for (idx, cell) in acc.iter_mut().enumerate() {
        *cell = if idx / n == idx % n { 0.0 } else { *cell / scale };
    }
    WeightMatrix { n, w: acc }
}
