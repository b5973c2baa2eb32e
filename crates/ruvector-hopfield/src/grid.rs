//! Binary grid state: the live simulation state and the stored patterns share
//! this representation.

use crate::error::{HopfieldError, Result};
use rand::Rng;

/// Active neuron (drawn cell).
pub const UP: i8 = 1;
/// Inactive neuron (blank cell).
pub const DOWN: i8 = -1;

/// An `rows × cols` grid of `±1` spins stored row-major.
///
/// Every constructor validates the cells, so code holding a `Grid` may assume
/// each value is exactly `-1` or `+1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<i8>,
}

impl Grid {
    /// Build a grid from a flattened row-major cell vector.
    pub fn new(rows: usize, cols: usize, cells: Vec<i8>) -> Result<Self> {
        if cells.len() != rows * cols {
            return Err(HopfieldError::shape(rows * cols, cells.len()));
        }
        for (index, &value) in cells.iter().enumerate() {
            check_spin(index, value as f64)?;
        }
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<i8>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut cells = Vec::with_capacity(n_rows * cols);
        for row in rows {
            if row.len() != cols {
                return Err(HopfieldError::shape(cols, row.len()));
            }
            cells.extend(row);
        }
        Self::new(n_rows, cols, cells)
    }

    /// Build a grid from numeric values as delivered by JSON or JavaScript.
    ///
    /// Values must be exactly `-1.0` or `1.0`.
    pub fn from_values(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        if values.len() != rows * cols {
            return Err(HopfieldError::shape(rows * cols, values.len()));
        }
        let cells = values
            .iter()
            .enumerate()
            .map(|(index, &value)| check_spin(index, value))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows, cols, cells })
    }

    /// Parse a nested JSON array such as `[[1,-1],[-1,1]]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let nested: Vec<Vec<f64>> = serde_json::from_str(json)?;
        let cols = nested.first().map_or(0, Vec::len);
        let rows = nested.len();
        let mut values = Vec::with_capacity(rows * cols);
        for row in nested {
            if row.len() != cols {
                return Err(HopfieldError::shape(cols, row.len()));
            }
            values.extend(row);
        }
        Self::from_values(rows, cols, &values)
    }

    /// Grid with every cell set to `spin`.
    pub fn filled(rows: usize, cols: usize, spin: i8) -> Result<Self> {
        check_spin(0, spin as f64)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![spin; rows * cols],
        })
    }

    /// Blank grid (all `-1`).
    pub fn cleared(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![DOWN; rows * cols],
        }
    }

    /// Uniformly random grid.
    pub fn random(rows: usize, cols: usize, rng: &mut impl Rng) -> Self {
        let cells = (0..rows * cols)
            .map(|_| if rng.gen::<bool>() { UP } else { DOWN })
            .collect();
        Self { rows, cols, cells }
    }

    /// Wrap cells that are already known to be `±1`.
    pub(crate) fn from_spins(rows: usize, cols: usize, cells: Vec<i8>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        debug_assert!(cells.iter().all(|&c| c == UP || c == DOWN));
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of neurons N.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flattened row-major view.
    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<i8> {
        self.cells
    }

    /// Cell value, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<i8> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set one cell in place.
    pub fn set(&mut self, row: usize, col: usize, spin: i8) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(HopfieldError::CellOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let index = row * self.cols + col;
        self.cells[index] = check_spin(index, spin as f64)?;
        Ok(())
    }

    /// Copy of this grid with one cell replaced.
    pub fn with_cell(&self, row: usize, col: usize, spin: i8) -> Result<Self> {
        let mut next = self.clone();
        next.set(row, col, spin)?;
        Ok(next)
    }

    /// Global sign flip of every cell.
    pub fn flipped(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(|&c| -c).collect(),
        }
    }

    /// Number of `+1` cells.
    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| c == UP).count()
    }

    /// Integer dot product with another grid of the same size.
    pub fn dot(&self, other: &Grid) -> Result<i64> {
        if other.len() != self.len() {
            return Err(HopfieldError::shape(self.len(), other.len()));
        }
        Ok(dot(&self.cells, &other.cells))
    }

    /// Nested rows, the shape the drawing UI works with.
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells.chunks(self.cols).map(<[i8]>::to_vec).collect()
    }

    /// Nested JSON array, pretty-printed like the UI's grid export.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_rows())?)
    }
}

#[inline]
pub(crate) fn dot(a: &[i8], b: &[i8]) -> i64 {
    a.iter().zip(b).map(|(&x, &y)| (x as i64) * (y as i64)).sum()
}

pub(crate) fn check_spin(index: usize, value: f64) -> Result<i8> {
    if value == 1.0 {
        Ok(UP)
    } else if value == -1.0 {
        Ok(DOWN)
    } else {
        Err(HopfieldError::InvalidCellValue { index, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_from_rows_roundtrip_shape() {
        let g = Grid::from_rows(vec![vec![1, -1, 1], vec![-1, -1, 1]]).unwrap();
        assert_eq!(g.dims(), (2, 3));
        assert_eq!(g.len(), 6);
        assert_eq!(g.get(1, 2), Some(1));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.to_rows(), vec![vec![1, -1, 1], vec![-1, -1, 1]]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Grid::from_rows(vec![vec![1, -1], vec![1]]).unwrap_err();
        assert!(matches!(
            err,
            HopfieldError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_invalid_cell_rejected() {
        let err = Grid::new(1, 3, vec![1, 0, -1]).unwrap_err();
        assert!(matches!(err, HopfieldError::InvalidCellValue { index: 1, .. }));

        let err = Grid::from_values(1, 2, &[1.0, 0.5]).unwrap_err();
        assert!(matches!(err, HopfieldError::InvalidCellValue { index: 1, .. }));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = Grid::new(2, 2, vec![1, 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            HopfieldError::ShapeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_json_ingestion() {
        let g = Grid::from_json("[[1,-1],[-1,1]]").unwrap();
        assert_eq!(g.as_slice(), &[1, -1, -1, 1]);

        let err = Grid::from_json("[[1,2],[-1,1]]").unwrap_err();
        assert!(matches!(err, HopfieldError::InvalidCellValue { index: 1, .. }));

        let err = Grid::from_json("[[1,-1],[1]]").unwrap_err();
        assert!(matches!(err, HopfieldError::ShapeMismatch { .. }));

        let err = Grid::from_json("{\"a\": 1}").unwrap_err();
        assert!(matches!(err, HopfieldError::Serialization(_)));
    }

    #[test]
    fn test_json_export_parses_back() {
        let g = Grid::from_rows(vec![vec![1, -1], vec![-1, -1]]).unwrap();
        let json = g.to_json().unwrap();
        assert_eq!(Grid::from_json(&json).unwrap(), g);
    }

    #[test]
    fn test_cleared_and_draw() {
        let mut g = Grid::cleared(8, 8);
        assert_eq!(g.active_cells(), 0);
        g.set(3, 4, UP).unwrap();
        assert_eq!(g.active_cells(), 1);
        assert_eq!(g.get(3, 4), Some(UP));

        let err = g.set(8, 0, UP).unwrap_err();
        assert!(matches!(err, HopfieldError::CellOutOfBounds { row: 8, .. }));
        assert!(g.set(0, 0, 0).is_err());
    }

    #[test]
    fn test_flip_and_dot() {
        let g = Grid::from_rows(vec![vec![1, -1], vec![-1, 1]]).unwrap();
        let f = g.flipped();
        assert_eq!(f.as_slice(), &[-1, 1, 1, -1]);
        assert_eq!(g.dot(&g).unwrap(), 4);
        assert_eq!(g.dot(&f).unwrap(), -4);
        assert!(g.dot(&Grid::cleared(3, 3)).is_err());
    }

    #[test]
    fn test_random_grid_is_binary() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let g = Grid::random(8, 8, &mut rng);
        assert_eq!(g.len(), 64);
        assert!(g.as_slice().iter().all(|&c| c == UP || c == DOWN));
    }

    #[test]
    fn test_filled_validates_spin() {
        assert_eq!(Grid::filled(2, 2, UP).unwrap().active_cells(), 4);
        assert!(Grid::filled(2, 2, 3).is_err());
    }
}
