//! # ruvector-hopfield
//!
//! Associative-memory engine that recalls stored binary patterns from partial
//! or noisy grids.
//!
//! Two networks share the same grid and pattern types:
//!
//! - **Classical Hopfield**: Hebbian outer-product weights, the quadratic
//!   energy `E = −½ Σ Wᵢⱼ gᵢ gⱼ`, and a stochastic synchronous update.
//! - **Dense associative memory**: the rectified-polynomial energy
//!   `E = −Σ_μ F(ξ^μ · g)` with `F(x) = max(x, 0)ᵈ`, and a deterministic
//!   asynchronous update that never builds a weight matrix.
//!
//! ## Core abstractions
//!
//! | Module | What it provides |
//! |--------|-----------------|
//! | [`grid`] | `Grid` – validated `±1` cell grid |
//! | [`patterns`] | `PatternSet`, `PatternSelection` |
//! | [`weights`] | `WeightMatrix`, Hebbian `train` |
//! | [`energy`] | `EnergyModel` trait, `Classical`, `Dense`, `rectified_power` |
//! | [`noise`] | Activation probability and stochastic spin draws |
//! | [`dynamics`] | `synchronous_update`, `dense_update_pass`, `UpdateCursor` |
//! | [`metrics`] | Overlap, Hamming distance, closest pattern, `Trace` |
//! | [`session`] | `RecallSession` – one independent simulation |
//! | [`config`] | `HopfieldConfig`, `UpdateRule` |
//!
//! ## Quick start
//!
//! ```no_run
//! use ruvector_hopfield::{
//!     classical_energy, dense_update_pass, train, Grid, PatternSet, UpdateCursor,
//! };
//!
//! let mut patterns = PatternSet::new(2, 2);
//! patterns.push_json("X", "[[1,-1],[-1,1]]").unwrap();
//!
//! let weights = train(&patterns);
//! let grid = Grid::from_rows(vec![vec![1, 1], vec![-1, 1]]).unwrap();
//! println!("Classical energy: {:.3}", classical_energy(&grid, &weights).unwrap());
//!
//! let (recalled, cursor) =
//!     dense_update_pass(&grid, &patterns, UpdateCursor::new(), 4, 3).unwrap();
//! assert_eq!(recalled, *patterns.get("X").unwrap());
//! assert_eq!(cursor.position(), 0);
//! ```

pub mod config;
pub mod dynamics;
pub mod energy;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod noise;
pub mod patterns;
pub mod session;
pub mod weights;

// Re-export the most commonly used items at the crate root.
pub use config::{HopfieldConfig, UpdateRule};
pub use dynamics::{dense_update_pass, synchronous_update, DenseUpdater, UpdateCursor};
pub use energy::{
    check_degree, classical_energy, dense_energy, rectified_power, Classical, Dense, EnergyModel,
};
pub use error::{HopfieldError, Result};
pub use grid::Grid;
pub use metrics::{closest_pattern, hamming_distance, overlap, Trace};
pub use patterns::{Pattern, PatternSelection, PatternSet};
pub use session::RecallSession;
pub use weights::{train, train_vectors, WeightMatrix};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
