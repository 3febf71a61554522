//! Collision geometry, the tracked-object collision system with its debris
//! sub-simulation, and eased path interpolation for drone movement.
//!
//! Everything here is deterministic: randomness (debris jitter) comes from
//! a caller-supplied seeded RNG, and the interpolator advances on the
//! simulation clock, never wall time.

pub mod collision;
pub mod geometry;
pub mod interpolation;
