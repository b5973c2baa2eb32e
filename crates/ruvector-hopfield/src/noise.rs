//! Thermal noise for the synchronous rule: net input to firing probability,
//! and the stochastic threshold that turns a probability into a spin.

use crate::grid::{DOWN, UP};
use rand::Rng;

/// Default tanh gain of the synchronous rule.
pub const DEFAULT_STEEPNESS: f64 = 3.0;

/// Probability that a neuron with net input `h` fires:
///   p(h) = ½ (1 + tanh(k·h))
#[inline]
pub fn activation_probability(h: f64, steepness: f64) -> f64 {
    0.5 * (1.0 + (steepness * h).tanh())
}

/// Draw `r ~ U[0, 1)` and return `+1` if `p > r`, else `-1`.
#[inline]
pub fn sample_spin(p: f64, rng: &mut impl Rng) -> i8 {
    let r: f64 = rng.gen();
    if p > r {
        UP
    } else {
        DOWN
    }
}
