//! End-of-frame sweep: breach detection and release of dead entities.

use skyshield_core::constants::BREACH_RANGE;
use skyshield_core::enums::GameOverReason;
use skyshield_core::events::GameEvent;
use skyshield_core::types::EntityId;

use crate::bus::EventBus;
use crate::config::EngineConfig;
use crate::state::GameState;

pub fn run(state: &mut GameState, config: &EngineConfig, bus: &mut EventBus) {
    let now = state.game_time;
    let center = config.center();

    // A threat inside breach range of the defended point ends the game.
    let breach = state
        .pools
        .threats
        .iter_active()
        .filter(|(_, t)| t.alive())
        .find(|(_, t)| t.position.distance(center) <= BREACH_RANGE)
        .map(|(_, t)| (t.id, t.position));
    if let Some((id, position)) = breach {
        bus.emit(GameEvent::ThreatBreached { id, position });
        bus.emit(GameEvent::GameOver {
            score: state.score,
            reason: GameOverReason::Breach,
        });
        state.running = false;
    }

    // Safety net: anything dead that a damage site did not release.
    let dead_drones: Vec<EntityId> = state
        .pools
        .drones
        .iter_active()
        .filter(|(_, d)| !d.alive())
        .map(|(_, d)| d.id)
        .collect();
    for id in dead_drones {
        state.pools.release_drone(id, now);
        bus.emit(GameEvent::DroneLost { id });
    }

    state.pools.threats.validate_active(now, |t| t.alive());
}
