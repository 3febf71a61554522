//! Wave progression: difficulty scaling, wave composition, per-wave
//! weather, the spawn scheduler, and scenario presets.
//!
//! The wave manager is decoupled from the game engine — it talks to its
//! host exclusively through callbacks and is polled on the same external
//! clock as the engine. Wave configs are derived deterministically from
//! the wave number and are never persisted.

pub mod composer;
pub mod difficulty;
pub mod manager;
pub mod scenario;
pub mod weather;

pub use composer::{compose_wave, SpawnGroup, WaveConfig};
pub use difficulty::{difficulty_for_wave, DifficultyMods};
pub use manager::{SpawnOrder, WaveCallbacks, WaveManager, WaveManagerConfig, WaveProgress};
pub use scenario::ScenarioPreset;
