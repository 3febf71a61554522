//! The game engine: single source of truth for simulation state.
//!
//! All mutation funnels through `queue_event` and is applied at the start
//! of the next `update(dt)`, in FIFO order, before any entity integration.
//! Resource shortfalls and stale ids silently decline the event — callers
//! observe the outcome only by diffing state. This fail-open policy is
//! deliberate; the consuming UI has no error channel.

use std::collections::{HashMap, VecDeque};

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;

use skyshield_core::catalog::Catalog;
use skyshield_core::constants::{
    AMMUNITION_CRITICAL_FRACTION, ENERGY_CRITICAL_FRACTION, PATROL_BOX_HALF_EXTENT,
    PROJECTILE_SPEED, WEAPON_BASE_DAMAGE,
};
use skyshield_core::entities::{DeploymentZone, Formation};
use skyshield_core::enums::{
    DroneKind, GameOverReason, ResourceKind, SpecialTrait, ThreatKind, WeaponKind,
};
use skyshield_core::events::GameEvent;
use skyshield_core::types::{aim, EntityId};
use skyshield_physics::collision::CollisionSystem;
use skyshield_physics::interpolation::{InterpolatorConfig, PatrolPath};

use crate::bus::EventBus;
use crate::config::{ConfigPatch, EngineConfig};
use crate::events::SimEvent;
use crate::snapshot::{self, HudSnapshot};
use crate::state::GameState;
use crate::systems;

/// An externally registered per-frame system, run in registration order
/// between event application and the built-in passes.
pub trait System {
    fn update(&mut self, state: &mut GameState, dt: f64);
}

struct RegisteredSystem {
    name: String,
    system: Box<dyn System>,
}

pub struct GameEngine {
    config: EngineConfig,
    catalog: Catalog,
    state: GameState,
    queue: VecDeque<SimEvent>,
    systems: Vec<RegisteredSystem>,
    bus: EventBus,
    collisions: CollisionSystem,
    patrols: HashMap<EntityId, PatrolPath>,
    rng: ChaCha8Rng,
    next_entity_id: u32,
    next_formation_id: u32,
    next_zone_id: u32,
}

impl GameEngine {
    /// Create an engine over the given catalogue. The catalogue is the
    /// engine's only tuning source — no ambient globals — so differently
    /// tuned simulations can run side by side.
    pub fn new(config: EngineConfig, catalog: Catalog) -> Self {
        let state = GameState::new(&config, &catalog);
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            catalog,
            state,
            queue: VecDeque::new(),
            systems: Vec::new(),
            bus: EventBus::new(),
            collisions: CollisionSystem::new(),
            patrols: HashMap::new(),
            next_entity_id: 1,
            next_formation_id: 1,
            next_zone_id: 1,
        }
    }

    /// Queue an event for processing at the next update boundary.
    pub fn queue_event(&mut self, event: SimEvent) {
        self.queue.push_back(event);
    }

    pub fn queue_events(&mut self, events: impl IntoIterator<Item = SimEvent>) {
        self.queue.extend(events);
    }

    /// Begin (or resume) the simulation.
    pub fn start(&mut self) {
        if !self.state.running {
            self.state.running = true;
            self.bus.set_time(self.state.game_time);
            self.bus.emit(GameEvent::GameStarted);
        }
    }

    /// Halt the simulation; `update` becomes a no-op until `start`.
    pub fn stop(&mut self) {
        if self.state.running {
            self.state.running = false;
            self.bus.set_time(self.state.game_time);
            self.bus.emit(GameEvent::GameOver {
                score: self.state.score,
                reason: GameOverReason::Stopped,
            });
            self.bus.process_events();
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if !self.state.running {
            return;
        }

        self.bus.set_time(self.state.game_time);
        self.apply_queued_events();

        for registered in &mut self.systems {
            registered.system.update(&mut self.state, dt);
        }

        self.state.game_time += dt;
        self.bus.set_time(self.state.game_time);

        systems::motion::run(&mut self.state, &self.config, dt);
        systems::drones::run(
            &mut self.state,
            &self.catalog,
            &self.config,
            &mut self.patrols,
            &mut self.bus,
            dt,
        );
        systems::projectiles::run(&mut self.state, &mut self.bus, &mut self.rng, dt);
        systems::auto_engage::run(
            &mut self.state,
            &self.catalog,
            &self.config,
            &mut self.bus,
            &mut self.rng,
        );
        systems::collisions::run(
            &mut self.state,
            &self.catalog,
            &mut self.collisions,
            &mut self.bus,
            &mut self.rng,
            dt,
        );
        systems::particles::run(&mut self.state, dt);

        self.state.energy =
            (self.state.energy + self.config.energy_regen_per_sec * dt).min(self.state.max_energy);

        systems::cleanup::run(&mut self.state, &self.config, &mut self.bus);

        // Drop patrol paths whose drone is gone.
        let pools = &self.state.pools;
        self.patrols.retain(|id, _| pools.drone(*id).is_some());

        self.bus.process_events();
    }

    /// Read-only view of the authoritative state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Serializable HUD view of the current state.
    pub fn snapshot(&self) -> HudSnapshot {
        snapshot::build(&self.state, &self.catalog)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Subscribe/query access to the event bus.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Debris and registry access for hosts that render them.
    pub fn collisions(&self) -> &CollisionSystem {
        &self.collisions
    }

    /// Register an external system, run in registration order each frame.
    pub fn register_system(&mut self, name: impl Into<String>, system: Box<dyn System>) {
        self.systems.push(RegisteredSystem {
            name: name.into(),
            system,
        });
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name.as_str()).collect()
    }

    /// Apply a partial config change. Resource maxima take effect
    /// immediately; current values are clamped into the new range.
    pub fn apply_config(&mut self, patch: ConfigPatch) {
        patch.apply(&mut self.config);
        self.state.target_frame_rate = self.config.target_frame_rate;
        self.state.max_energy = self.config.max_energy;
        self.state.max_ammunition = self.config.max_ammunition;
        self.state.energy = self.state.energy.min(self.state.max_energy);
        self.state.ammunition = self.state.ammunition.min(self.state.max_ammunition);
    }

    /// Reinitialize state from the current config and clear the event
    /// queue. Bus subscriptions survive; history and queued events do not.
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config, &self.catalog);
        self.queue.clear();
        self.bus.clear_queue();
        self.bus.clear_history();
        self.bus.set_time(0.0);
        self.collisions = CollisionSystem::new();
        self.patrols.clear();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.next_entity_id = 1;
        self.next_formation_id = 1;
        self.next_zone_id = 1;
    }

    fn alloc_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    fn apply_queued_events(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::SpawnThreat {
                kind,
                position,
                speed_mult,
                health_mult,
                special,
            } => self.apply_spawn_threat(kind, position, speed_mult, health_mult, special),
            SimEvent::DeployDrone { kind, position } => self.apply_deploy_drone(kind, position),
            SimEvent::FireWeapon { weapon, target } => self.apply_fire_weapon(weapon, target),
            SimEvent::NeutralizeThreat { id } => self.apply_neutralize(id),
            SimEvent::AdjustResources { energy, ammunition } => {
                self.apply_adjust_resources(energy, ammunition)
            }
            SimEvent::AdvanceLevel { level } => {
                self.state.level = level;
            }
            SimEvent::SetWeather { weather } => {
                self.state.weather = weather;
            }
            SimEvent::CreateFormation { name, members } => self.apply_create_formation(name, members),
            SimEvent::ActivateZone { center, radius } => self.apply_activate_zone(center, radius),
        }
    }

    fn apply_spawn_threat(
        &mut self,
        kind: ThreatKind,
        position: Option<DVec2>,
        speed_mult: f64,
        health_mult: f64,
        special: Option<SpecialTrait>,
    ) {
        let now = self.state.game_time;
        let position = position.unwrap_or_else(|| {
            random_edge_position(&mut self.rng, self.config.board_width, self.config.board_height)
        });

        // Pool exhausted: the spawn is skipped, silently.
        let Some(slot) = self.state.pools.threats.acquire(now) else {
            return;
        };
        let id = self.alloc_entity_id();

        let spec = self.catalog.threat(kind);
        let accel: f64 = special
            .iter()
            .filter_map(|t| match t {
                SpecialTrait::Accelerated { speed_factor } => Some(*speed_factor),
                _ => None,
            })
            .product();
        let speed = spec.speed * speed_mult * accel;
        let velocity = aim(position, self.config.center(), speed);
        let health = spec.health * health_mult;
        let behavior = spec.behavior;
        let priority = spec.priority;
        let points = spec.points;

        if let Some(threat) = self.state.pools.threats.get_mut(slot) {
            threat.id = id;
            threat.kind = kind;
            threat.position = position;
            threat.velocity = velocity;
            threat.health = health;
            threat.max_health = health;
            threat.behavior = behavior;
            threat.priority = priority;
            threat.points = points;
            threat.specials = special.into_iter().collect();
            threat.trail.record(position);
            threat.updated_at = now;
        }

        self.bus.emit(GameEvent::ThreatSpawned { id, kind, position });
    }

    fn apply_deploy_drone(&mut self, kind: DroneKind, position: DVec2) {
        let now = self.state.game_time;
        if self.state.energy < self.config.drone_energy_cost {
            return;
        }
        let Some(slot) = self.state.pools.drones.acquire(now) else {
            return;
        };
        self.state.energy -= self.config.drone_energy_cost;
        let id = self.alloc_entity_id();

        let spec = self.catalog.drone(kind).clone();
        let h = PATROL_BOX_HALF_EXTENT;
        let waypoints = vec![
            position + DVec2::new(-h, -h),
            position + DVec2::new(h, -h),
            position + DVec2::new(h, h),
            position + DVec2::new(-h, h),
        ];

        if let Some(drone) = self.state.pools.drones.get_mut(slot) {
            drone.id = id;
            drone.kind = kind;
            drone.position = position;
            drone.health = spec.max_health;
            drone.max_health = spec.max_health;
            drone.energy = spec.max_energy;
            drone.max_energy = spec.max_energy;
            drone.waypoints = waypoints.clone();
            drone.updated_at = now;
        }

        self.patrols.insert(
            id,
            PatrolPath::new(
                waypoints,
                InterpolatorConfig {
                    max_speed: spec.speed,
                    ..Default::default()
                },
            ),
        );

        self.bus.emit(GameEvent::DroneDeployed { id, kind, position });
        self.emit_resource_events();
    }

    fn apply_fire_weapon(&mut self, weapon: WeaponKind, target: EntityId) {
        let now = self.state.game_time;
        let spec = self.catalog.countermeasure(weapon).clone();

        let ready = self
            .state
            .weapon(weapon)
            .is_some_and(|w| w.ready(now) && w.has_rounds());
        if !ready {
            return;
        }

        let Some((target_kind, target_position)) = self
            .state
            .pools
            .threat(target)
            .filter(|t| t.alive())
            .map(|t| (t.kind, t.position))
        else {
            return;
        };

        if spec.auto_engage {
            // Manual fire of an auto countermeasure: instant effect, no
            // projectile, no ammunition debit.
            if let Some(weapon_state) = self.state.weapon_mut(weapon) {
                weapon_state.ready_at = now + spec.cooldown_secs;
            }
            let mut kill = None;
            if let Some(threat) = self.state.pools.threat_mut(target) {
                threat.health -=
                    WEAPON_BASE_DAMAGE * spec.effectiveness(threat.kind) * threat.shield_factor();
                if threat.health <= 0.0 {
                    kill = Some((threat.kind, threat.points, threat.position));
                }
            }
            self.bus.emit(GameEvent::WeaponFired {
                weapon,
                target,
                projectile: None,
            });
            if let Some((kind, points, position)) = kill {
                self.state.pools.release_threat(target, now);
                self.state.score += points;
                self.bus.emit(GameEvent::ThreatNeutralized {
                    id: target,
                    kind,
                    points,
                    by: Some(EntityId::BASE),
                });
                systems::particles::spawn_burst(
                    &mut self.state.pools,
                    &mut self.rng,
                    position,
                    now,
                );
            }
            return;
        }

        if self.state.ammunition == 0 {
            return;
        }
        let Some(slot) = self.state.pools.projectiles.acquire(now) else {
            return;
        };

        // All gates passed: debit and commit.
        self.state.ammunition -= 1;
        if let Some(weapon_state) = self.state.weapon_mut(weapon) {
            weapon_state.ready_at = now + spec.cooldown_secs;
            if let Some(rounds) = weapon_state.rounds.as_mut() {
                *rounds -= 1;
            }
        }

        let id = self.alloc_entity_id();
        let origin = self.config.center();
        if let Some(projectile) = self.state.pools.projectiles.get_mut(slot) {
            projectile.id = id;
            projectile.weapon = weapon;
            projectile.position = origin;
            projectile.velocity = aim(origin, target_position, PROJECTILE_SPEED);
            projectile.damage = WEAPON_BASE_DAMAGE * spec.effectiveness(target_kind);
            projectile.range = spec.range;
            projectile.travelled = 0.0;
            projectile.target = target;
            projectile.owner = EntityId::BASE;
            projectile.updated_at = now;
        }

        self.bus.emit(GameEvent::WeaponFired {
            weapon,
            target,
            projectile: Some(id),
        });
        self.emit_resource_events();
    }

    fn apply_neutralize(&mut self, id: EntityId) {
        let now = self.state.game_time;
        let Some((kind, position)) = self
            .state
            .pools
            .threat(id)
            .map(|t| (t.kind, t.position))
        else {
            return;
        };

        self.state.pools.release_threat(id, now);
        let points = self.config.score_bonus;
        self.state.score += points;
        self.bus.emit(GameEvent::ThreatNeutralized {
            id,
            kind,
            points,
            by: None,
        });
        systems::particles::spawn_burst(&mut self.state.pools, &mut self.rng, position, now);
    }

    fn apply_adjust_resources(&mut self, energy_delta: f64, ammunition_delta: i32) {
        self.state.energy = (self.state.energy + energy_delta).clamp(0.0, self.state.max_energy);
        let ammunition = self.state.ammunition as i64 + ammunition_delta as i64;
        self.state.ammunition = ammunition.clamp(0, self.state.max_ammunition as i64) as u32;
        self.emit_resource_events();
    }

    fn apply_create_formation(&mut self, name: String, members: Vec<EntityId>) {
        let members: Vec<EntityId> = members
            .into_iter()
            .filter(|id| self.state.pools.drone(*id).is_some())
            .collect();
        if members.is_empty() {
            return;
        }

        let id = self.next_formation_id;
        self.next_formation_id += 1;

        let mut center = DVec2::ZERO;
        for member in &members {
            if let Some(drone) = self.state.pools.drone_mut(*member) {
                center += drone.position;
                drone.formation = Some(id);
            }
        }
        center /= members.len() as f64;

        let size = members.len();
        self.state.formations.push(Formation {
            id,
            name,
            center,
            members,
        });
        self.bus.emit(GameEvent::FormationCreated { id, size });
    }

    fn apply_activate_zone(&mut self, center: DVec2, radius: f64) {
        let id = self.next_zone_id;
        self.next_zone_id += 1;
        self.state.deployment_zones.push(DeploymentZone {
            id,
            center,
            radius,
            active: true,
        });
        self.bus.emit(GameEvent::ZoneActivated { id });
    }

    fn emit_resource_events(&mut self) {
        self.bus.emit(GameEvent::ResourceChanged {
            energy: self.state.energy,
            ammunition: self.state.ammunition,
        });
        if self.state.energy < self.state.max_energy * ENERGY_CRITICAL_FRACTION {
            self.bus.emit(GameEvent::ResourceCritical {
                resource: ResourceKind::Energy,
                value: self.state.energy,
            });
        }
        if (self.state.ammunition as f64)
            < self.state.max_ammunition as f64 * AMMUNITION_CRITICAL_FRACTION
        {
            self.bus.emit(GameEvent::ResourceCritical {
                resource: ResourceKind::Ammunition,
                value: self.state.ammunition as f64,
            });
        }
    }
}

/// Random point on the board perimeter.
fn random_edge_position(rng: &mut ChaCha8Rng, width: f64, height: f64) -> DVec2 {
    match rng.gen_range(0..4u8) {
        0 => DVec2::new(rng.gen_range(0.0..width), 0.0),
        1 => DVec2::new(width, rng.gen_range(0.0..height)),
        2 => DVec2::new(rng.gen_range(0.0..width), height),
        _ => DVec2::new(0.0, rng.gen_range(0.0..height)),
    }
}
