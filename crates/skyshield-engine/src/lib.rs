//! The authoritative simulation engine.
//!
//! `GameEngine` owns the game state, processes queued simulation events at
//! the tick boundary, runs all systems in a fixed order, and produces
//! serializable HUD snapshots. Completely headless — driven by an external
//! clock through `update(dt)` — enabling deterministic testing.

pub mod bus;
pub mod config;
pub mod engine;
pub mod events;
pub mod pools;
pub mod snapshot;
pub mod state;
pub mod systems;

pub use bus::{EventBus, EventFilter, SubscribeOpts};
pub use config::{ConfigPatch, EngineConfig};
pub use engine::{GameEngine, System};
pub use events::SimEvent;
pub use snapshot::HudSnapshot;
pub use state::{GameState, WeaponState};
