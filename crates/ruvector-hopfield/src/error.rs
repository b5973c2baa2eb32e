//! Error types for the Hopfield engine.

use thiserror::Error;

/// Result type alias for Hopfield operations.
pub type Result<T> = std::result::Result<T, HopfieldError>;

/// Errors surfaced by training, energy evaluation and state updates.
///
/// An empty pattern set is deliberately not an error: energies degrade to
/// zero and dense updates fall back to `-1`.
#[derive(Debug, Error)]
pub enum HopfieldError {
    /// A grid, pattern, row or weight matrix has the wrong number of cells.
    #[error("Shape mismatch: expected {expected} cells, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Weight matrix rows and columns differ.
    #[error("Weight matrix is not square: {rows} rows x {cols} columns")]
    NonSquareWeights { rows: usize, cols: usize },

    /// A cell holds something other than `-1` or `+1`.
    #[error("Invalid cell value {value} at index {index} (must be -1 or +1)")]
    InvalidCellValue { index: usize, value: f64 },

    /// A cell coordinate lies outside the grid.
    #[error("Cell ({row}, {col}) outside {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The asynchronous update cursor points past the last neuron.
    #[error("Update cursor {position} out of range for {len} neurons")]
    CursorOutOfRange { position: usize, len: usize },

    /// Rejected configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HopfieldError {
    pub(crate) fn shape(expected: usize, actual: usize) -> Self {
        HopfieldError::ShapeMismatch { expected, actual }
    }
}
