//! Auto-triggering countermeasures.
//!
//! Countermeasures flagged `auto_engage` (electronic warfare) fire on
//! their own: whenever one is off cooldown and a threat sits inside its
//! range, it engages the nearest threat instantly — no projectile and no
//! ammunition debit, only the cooldown.

use rand_chacha::ChaCha8Rng;

use skyshield_core::catalog::Catalog;
use skyshield_core::constants::WEAPON_BASE_DAMAGE;
use skyshield_core::events::GameEvent;
use skyshield_core::types::EntityId;

use crate::bus::EventBus;
use crate::config::EngineConfig;
use crate::state::GameState;
use crate::systems::particles;

pub fn run(
    state: &mut GameState,
    catalog: &Catalog,
    config: &EngineConfig,
    bus: &mut EventBus,
    rng: &mut ChaCha8Rng,
) {
    let now = state.game_time;
    let center = config.center();

    for spec in catalog.countermeasures.iter().filter(|s| s.auto_engage) {
        let ready = state.weapon(spec.weapon).is_some_and(|w| w.ready(now));
        if !ready {
            continue;
        }

        let nearest = state
            .pools
            .threats
            .iter_active()
            .filter(|(_, t)| t.alive())
            .map(|(_, t)| (t.id, t.position.distance(center)))
            .filter(|(_, d)| *d <= spec.range)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let Some((target_id, _)) = nearest else {
            continue;
        };

        if let Some(weapon) = state.weapon_mut(spec.weapon) {
            weapon.ready_at = now + spec.cooldown_secs;
        }

        let mut kill = None;
        if let Some(threat) = state.pools.threat_mut(target_id) {
            threat.health -= WEAPON_BASE_DAMAGE * spec.effectiveness(threat.kind) * threat.shield_factor();
            if threat.health <= 0.0 {
                kill = Some((threat.kind, threat.points, threat.position));
            }
        }

        bus.emit(GameEvent::WeaponFired {
            weapon: spec.weapon,
            target: target_id,
            projectile: None,
        });

        if let Some((kind, points, position)) = kill {
            state.pools.release_threat(target_id, now);
            state.score += points;
            bus.emit(GameEvent::ThreatNeutralized {
                id: target_id,
                kind,
                points,
                by: Some(EntityId::BASE),
            });
            particles::spawn_burst(&mut state.pools, rng, position, now);
        }
    }
}
