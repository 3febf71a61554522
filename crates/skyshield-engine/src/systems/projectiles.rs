//! Projectile flight and hit resolution.
//!
//! Rounds home on their target's current position at constant speed and
//! resolve by proximity. Damage applies the target's shield factor; a kill
//! credits the threat's catalogue points. Rounds expire when their flight
//! distance exhausts the weapon's effective range or the target is gone.

use glam::DVec2;
use rand_chacha::ChaCha8Rng;

use skyshield_core::constants::{PROJECTILE_HIT_RADIUS, PROJECTILE_SPEED};
use skyshield_core::enums::ThreatKind;
use skyshield_core::events::GameEvent;
use skyshield_core::types::{aim, EntityId};

use crate::bus::EventBus;
use crate::pools::PoolManager;
use crate::state::GameState;
use crate::systems::particles;

struct Kill {
    threat: EntityId,
    owner: EntityId,
    kind: ThreatKind,
    points: u64,
    position: DVec2,
}

pub fn run(state: &mut GameState, bus: &mut EventBus, rng: &mut ChaCha8Rng, dt: f64) {
    let now = state.game_time;
    let mut kills: Vec<Kill> = Vec::new();
    let mut expired: Vec<EntityId> = Vec::new();

    {
        let PoolManager {
            threats,
            projectiles,
            ..
        } = &mut state.pools;

        for (_slot, projectile) in projectiles.iter_active_mut() {
            let target_pos = match threats.find(|t| t.id == projectile.target && t.alive()) {
                Some((_, threat)) => threat.position,
                None => {
                    expired.push(projectile.id);
                    continue;
                }
            };

            projectile.velocity = aim(projectile.position, target_pos, PROJECTILE_SPEED);
            let step = projectile.velocity * dt;
            projectile.position += step;
            projectile.travelled += step.length();
            projectile.updated_at = now;

            if projectile.position.distance(target_pos) <= PROJECTILE_HIT_RADIUS {
                let target_id = projectile.target;
                let damage = projectile.damage;
                let owner = projectile.owner;
                if let Some((_, threat)) = threats.find_mut(|t| t.id == target_id) {
                    threat.health -= damage * threat.shield_factor();
                    if threat.health <= 0.0 && !kills.iter().any(|k| k.threat == target_id) {
                        kills.push(Kill {
                            threat: target_id,
                            owner,
                            kind: threat.kind,
                            points: threat.points,
                            position: threat.position,
                        });
                    }
                }
                expired.push(projectile.id);
            } else if projectile.travelled >= projectile.range {
                expired.push(projectile.id);
            }
        }
    }

    for id in expired {
        state.pools.release_projectile(id, now);
    }

    for kill in kills {
        state.pools.release_threat(kill.threat, now);
        state.score += kill.points;
        bus.emit(GameEvent::ThreatNeutralized {
            id: kill.threat,
            kind: kill.kind,
            points: kill.points,
            by: Some(kill.owner),
        });
        particles::spawn_burst(&mut state.pools, rng, kill.position, now);
    }
}
