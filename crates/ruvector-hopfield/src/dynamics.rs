//! State updates: the stochastic synchronous sweep over classical weights and
//! the deterministic asynchronous dense-memory pass.

use crate::energy::{check_degree, rectified_power};
use crate::error::{HopfieldError, Result};
use crate::grid::{Grid, DOWN, UP};
use crate::noise::{activation_probability, sample_spin};
use crate::patterns::PatternSet;
use crate::weights::WeightMatrix;
use rand::Rng;
use tracing::trace;

/// Default number of neurons visited per asynchronous pass.
pub const DEFAULT_CELLS_PER_CALL: usize = 8;

/// One **synchronous** stochastic sweep.
///
/// Computes `h = g·W` from the old state, maps each component through
/// [`activation_probability`] and draws every neuron independently with
/// [`sample_spin`]. All neurons read the same snapshot.
pub fn synchronous_update(
    grid: &Grid,
    weights: &WeightMatrix,
    steepness: f64,
    rng: &mut impl Rng,
) -> Result<Grid> {
    let n = weights.dim();
    if grid.len() != n {
        return Err(HopfieldError::shape(n, grid.len()));
    }
    let g = grid.as_slice();

    let mut h = vec![0.0_f64; n];
    for (i, &gi) in g.iter().enumerate() {
        let gi = gi as f64;
        for (hj, &wij) in h.iter_mut().zip(weights.row(i)) {
            *hj += gi * wij;
        }
    }

    let next = h
        .into_iter()
        .map(|hj| sample_spin(activation_probability(hj, steepness), rng))
        .collect();
    Ok(Grid::from_spins(grid.rows(), grid.cols(), next))
}

/// Index of the next neuron the asynchronous pass will visit.
///
/// Threaded through [`dense_update_pass`] by value so independent sessions
/// never share it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UpdateCursor {
    position: usize,
}

impl UpdateCursor {
    /// Cursor at neuron 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: usize) -> Self {
        Self { position }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Cursor moved `steps` neurons forward, wrapping modulo `n`.
    #[inline]
    pub fn advance(self, steps: usize, n: usize) -> Self {
        if n == 0 {
            return self;
        }
        Self {
            position: (self.position + steps % n) % n,
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

/// Update neuron `c` in place by greedy dense-energy descent.
///
/// For each pattern the overlap is evaluated twice, with neuron `c` forced to
/// `+1` and to `-1`; the neuron takes `+1` only when
/// `Σ_μ [F(sum⁺) − F(sum⁻)] > 0`. Ties (including an empty pattern set)
/// resolve to `-1`.
///
/// `degree` is not range-checked here; [`dense_update_pass`] rejects degrees
/// whose sums overflow `f64`, which would otherwise turn every neuron to `-1`.
///
/// # Panics
///
/// Panics if `c >= state.len()`.
pub fn dense_update_neuron(state: &mut [i8], c: usize, patterns: &PatternSet, degree: u32) {
    let mut diff = 0.0_f64;
    for p in patterns.vectors() {
        let mut sum_pos = 0_i64;
        let mut sum_neg = 0_i64;
        for (i, (&pi, &gi)) in p.iter().zip(state.iter()).enumerate() {
            let pi = pi as i64;
            if i == c {
                sum_pos += pi;
                sum_neg -= pi;
            } else {
                let term = gi as i64 * pi;
                sum_pos += term;
                sum_neg += term;
            }
        }
        diff += rectified_power(sum_pos as f64, degree) - rectified_power(sum_neg as f64, degree);
    }
    state[c] = if diff > 0.0 { UP } else { DOWN };
}

/// One **asynchronous** dense pass of `cells_per_call` single-neuron updates,
/// starting at `cursor`. Each update sees the neurons already changed
/// earlier in the same pass.
///
/// Returns the new grid together with the advanced cursor. No weight matrix
/// is involved. Fails with [`HopfieldError::InvalidConfig`] when `degree` is
/// too large for the dense sums to stay finite.
pub fn dense_update_pass(
    grid: &Grid,
    patterns: &PatternSet,
    cursor: UpdateCursor,
    cells_per_call: usize,
    degree: u32,
) -> Result<(Grid, UpdateCursor)> {
    let n = grid.len();
    if cursor.position() >= n {
        return Err(HopfieldError::CursorOutOfRange {
            position: cursor.position(),
            len: n,
        });
    }
    if !patterns.is_empty() {
        if patterns.neurons() != n {
            return Err(HopfieldError::shape(patterns.neurons(), n));
        }
        check_degree(degree, n, patterns.len())?;
    }

    let mut state = grid.as_slice().to_vec();
    let mut c = cursor;
    for _ in 0..cells_per_call {
        dense_update_neuron(&mut state, c.position(), patterns, degree);
        c = c.advance(1, n);
    }
    trace!(
        from = cursor.position(),
        to = c.position(),
        cells = cells_per_call,
        "dense update pass"
    );
    Ok((Grid::from_spins(grid.rows(), grid.cols(), state), c))
}

/// Asynchronous dense updater owning the cursor of one simulation session.
#[derive(Clone, Debug)]
pub struct DenseUpdater {
    cursor: UpdateCursor,
    cells_per_call: usize,
    degree: u32,
}

impl DenseUpdater {
    pub fn new(cells_per_call: usize, degree: u32) -> Self {
        Self {
            cursor: UpdateCursor::new(),
            cells_per_call,
            degree,
        }
    }

    pub fn cursor(&self) -> UpdateCursor {
        self.cursor
    }

    pub fn cells_per_call(&self) -> usize {
        self.cells_per_call
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Run one pass and keep the advanced cursor.
    ///
    /// On error the cursor is left untouched.
    pub fn update_pass(&mut self, grid: &Grid, patterns: &PatternSet) -> Result<Grid> {
        let (next, cursor) =
            dense_update_pass(grid, patterns, self.cursor, self.cells_per_call, self.degree)?;
        self.cursor = cursor;
        Ok(next)
    }

    /// Move the cursor back to neuron 0.
    pub fn reset(&mut self) {
        self.cursor.reset();
    }
}

/// Fixed-point check: `true` if a full dense sweep (N single-neuron updates
/// from neuron 0) leaves `grid` unchanged.
pub fn is_dense_fixed_point(grid: &Grid, patterns: &PatternSet, degree: u32) -> Result<bool> {
    if grid.is_empty() {
        return Ok(true);
    }
    let (next, _) = dense_update_pass(grid, patterns, UpdateCursor::new(), grid.len(), degree)?;
    Ok(next == *grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::{classical_energy, dense_energy};
    use crate::weights::train;
    use rand::SeedableRng;

    fn rng(seed: u64) -> rand::rngs::StdRng {
        rand::rngs::StdRng::seed_from_u64(seed)
    }

    fn checker() -> Grid {
        Grid::from_rows(vec![vec![1, -1], vec![-1, 1]]).unwrap()
    }

    fn checker_set() -> PatternSet {
        PatternSet::from_grids(2, 2, [checker()]).unwrap()
    }

    #[test]
    fn test_cursor_wraps() {
        let c = UpdateCursor::at(3).advance(1, 4);
        assert_eq!(c.position(), 0);
        let c = UpdateCursor::new().advance(9, 4);
        assert_eq!(c.position(), 1);
        let mut c = UpdateCursor::at(2);
        c.reset();
        assert_eq!(c, UpdateCursor::new());
    }

    #[test]
    fn test_synchronous_update_shape_and_values() {
        let w = train(&checker_set());
        let mut rng = rng(1);
        let next = synchronous_update(&checker(), &w, 3.0, &mut rng).unwrap();
        assert_eq!(next.dims(), (2, 2));
        assert!(next.as_slice().iter().all(|&c| c == UP || c == DOWN));
    }

    #[test]
    fn test_synchronous_update_is_seed_reproducible() {
        let w = train(&checker_set());
        let g = Grid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
        let a = synchronous_update(&g, &w, 3.0, &mut rng(42)).unwrap();
        let b = synchronous_update(&g, &w, 3.0, &mut rng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_synchronous_update_zero_weights_is_fair_coin() {
        let w = WeightMatrix::zeros(64);
        let g = Grid::cleared(8, 8);
        let mut rng = rng(9);
        let mut ups = 0;
        for _ in 0..100 {
            ups += synchronous_update(&g, &w, 3.0, &mut rng).unwrap().active_cells();
        }
        let freq = ups as f64 / 6_400.0;
        assert!((freq - 0.5).abs() < 0.05, "frequency {freq}");
    }

    #[test]
    fn test_synchronous_update_shape_mismatch() {
        let w = WeightMatrix::zeros(9);
        assert!(synchronous_update(&checker(), &w, 3.0, &mut rng(0)).is_err());
    }

    #[test]
    fn test_high_gain_recalls_stored_pattern() {
        // With a strong gain the stored pattern is a near-certain fixed point:
        // h_j = p_j (N - 1) / N, so p(h) ≈ 1 for every aligned neuron.
        let w = train(&checker_set());
        let mut rng = rng(77);
        for _ in 0..50 {
            let next = synchronous_update(&checker(), &w, 50.0, &mut rng).unwrap();
            assert_eq!(next, checker());
        }
    }

    #[test]
    fn test_dense_pass_empty_set_drives_down() {
        let empty = PatternSet::new(2, 2);
        let g = Grid::filled(2, 2, UP).unwrap();
        let (next, c) = dense_update_pass(&g, &empty, UpdateCursor::at(1), 2, 3).unwrap();
        assert_eq!(next.as_slice(), &[1, -1, -1, 1]);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn test_dense_pass_full_cycle_returns_cursor() {
        let g = Grid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
        let (_, c) = dense_update_pass(&g, &checker_set(), UpdateCursor::new(), 4, 3).unwrap();
        assert_eq!(c, UpdateCursor::new());
    }

    #[test]
    fn test_dense_pass_repairs_corrupted_pattern() {
        let corrupted = Grid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
        let set = checker_set();
        let (next, _) = dense_update_pass(&corrupted, &set, UpdateCursor::new(), 4, 3).unwrap();
        assert_eq!(next, checker());
        assert!(dense_energy(&next, &set, 3).unwrap() < dense_energy(&corrupted, &set, 3).unwrap());
        assert_eq!(set.overlaps(&next).unwrap(), vec![4]);
    }

    #[test]
    fn test_dense_pass_cursor_out_of_range() {
        let err = dense_update_pass(&checker(), &checker_set(), UpdateCursor::at(4), 1, 3)
            .unwrap_err();
        assert!(matches!(
            err,
            HopfieldError::CursorOutOfRange {
                position: 4,
                len: 4
            }
        ));
    }

    #[test]
    fn test_dense_pass_shape_mismatch() {
        let err = dense_update_pass(&Grid::cleared(3, 3), &checker_set(), UpdateCursor::new(), 1, 3)
            .unwrap_err();
        assert!(matches!(err, HopfieldError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_dense_pass_rejects_overflowing_degree() {
        let ones = Grid::filled(8, 8, UP).unwrap();
        let set = PatternSet::from_grids(8, 8, [ones.clone()]).unwrap();
        let err = dense_update_pass(&ones, &set, UpdateCursor::new(), 64, 200).unwrap_err();
        assert!(matches!(err, HopfieldError::InvalidConfig(_)));
        assert!(dense_update_pass(&ones, &set, UpdateCursor::new(), 1, u32::MAX).is_err());

        // Largest degree that still fits keeps the stored pattern fixed.
        assert!(is_dense_fixed_point(&ones, &set, 170).unwrap());
        assert!(is_dense_fixed_point(&ones, &set, 171).is_err());
    }

    #[test]
    fn test_dense_updater_keeps_cursor() {
        let set = checker_set();
        let mut updater = DenseUpdater::new(3, 3);
        let g = updater.update_pass(&checker(), &set).unwrap();
        assert_eq!(updater.cursor().position(), 3);
        let _ = updater.update_pass(&g, &set).unwrap();
        assert_eq!(updater.cursor().position(), 2);
        updater.reset();
        assert_eq!(updater.cursor().position(), 0);

        // A failed pass leaves the cursor alone.
        let mut updater = DenseUpdater::new(1, 3);
        assert!(updater.update_pass(&Grid::cleared(1, 1), &set).is_err());
        assert_eq!(updater.cursor().position(), 0);
    }

    #[test]
    fn test_fixed_point_detection() {
        let set = checker_set();
        assert!(is_dense_fixed_point(&checker(), &set, 3).unwrap());
        let corrupted = Grid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
        assert!(!is_dense_fixed_point(&corrupted, &set, 3).unwrap());
    }

    #[test]
    fn test_classical_energy_not_increased_by_recall() {
        let set = checker_set();
        let w = train(&set);
        let corrupted = Grid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
        let recalled = synchronous_update(&corrupted, &w, 50.0, &mut rng(5)).unwrap();
        assert!(
            classical_energy(&recalled, &w).unwrap() <= classical_energy(&corrupted, &w).unwrap()
        );
    }
}
