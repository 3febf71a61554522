//! Simulation constants and tuning parameters.

// --- Board ---

/// Board width in abstract units.
pub const BOARD_WIDTH: f64 = 960.0;

/// Board height in abstract units.
pub const BOARD_HEIGHT: f64 = 720.0;

/// Range from the defended point at which a threat counts as a breach.
pub const BREACH_RANGE: f64 = 18.0;

/// Evasive threats reverse heading inside this range of the board center.
pub const EVASIVE_REVERSAL_RANGE: f64 = 100.0;

/// Fraction of threat speed applied as wind drift per unit wind.
pub const WIND_DRIFT_FACTOR: f64 = 0.25;

// --- Entity bookkeeping ---

/// Maximum positions kept in a threat's rendering trail.
pub const THREAT_TRAIL_LEN: usize = 10;

// --- Resources ---

/// Energy pool maximum.
pub const ENERGY_MAX: f64 = 100.0;

/// Ammunition pool maximum.
pub const AMMUNITION_MAX: u32 = 200;

/// Energy cost of deploying one drone.
pub const DRONE_ENERGY_COST: f64 = 50.0;

/// Passive energy regeneration per second while running.
pub const ENERGY_REGEN_PER_SEC: f64 = 2.0;

/// Energy fraction below which `ResourceCritical` fires.
pub const ENERGY_CRITICAL_FRACTION: f64 = 0.2;

/// Ammunition fraction below which `ResourceCritical` fires.
pub const AMMUNITION_CRITICAL_FRACTION: f64 = 0.1;

// --- Drones ---

/// Drone energy drain per second while airborne.
pub const DRONE_ENERGY_DRAIN_PER_SEC: f64 = 1.5;

/// Energy fraction at which a drone turns for home.
pub const DRONE_LOW_ENERGY_FRACTION: f64 = 0.2;

/// Range from base at which a returning drone is recovered.
pub const DRONE_RECOVERY_RANGE: f64 = 20.0;

/// Half-extent of the square patrol box assigned on deploy.
pub const PATROL_BOX_HALF_EXTENT: f64 = 60.0;

// --- Projectiles ---

/// Projectile flight speed.
pub const PROJECTILE_SPEED: f64 = 300.0;

/// Proximity radius for a projectile hit.
pub const PROJECTILE_HIT_RADIUS: f64 = 12.0;

/// Base damage scaled by a countermeasure's effectiveness multiplier.
pub const WEAPON_BASE_DAMAGE: f64 = 60.0;

// --- Scoring ---

/// Score credited by a direct neutralize event.
pub const SCORE_BONUS: u64 = 100;

// --- Pools ---

pub const THREAT_POOL_SIZE: usize = 50;
pub const DRONE_POOL_SIZE: usize = 12;
pub const PROJECTILE_POOL_SIZE: usize = 100;
pub const PARTICLE_POOL_SIZE: usize = 200;

// --- Particles ---

/// Particles spawned per neutralization burst.
pub const PARTICLE_BURST_COUNT: usize = 8;

/// Particle lifetime in seconds.
pub const PARTICLE_LIFETIME_SECS: f64 = 0.9;

/// Particle launch speed.
pub const PARTICLE_BURST_SPEED: f64 = 90.0;

/// Downward acceleration applied to particles and debris.
pub const PARTICLE_GRAVITY: f64 = 120.0;

/// Velocity damping factor applied to particles and debris each update.
pub const PARTICLE_DAMPING: f64 = 0.98;

// --- Collision ---

/// Impact force per unit of penetration for circle pairs.
pub const IMPACT_FORCE_CIRCLE_SCALE: f64 = 10.0;

/// Impact force per unit of penetration for rectangle pairs.
pub const IMPACT_FORCE_RECT_SCALE: f64 = 5.0;

/// Impact damage contribution per unit of impact force.
pub const IMPACT_DAMAGE_FORCE_FACTOR: f64 = 0.1;

/// Impact damage contribution per unit of relative speed.
pub const IMPACT_DAMAGE_SPEED_FACTOR: f64 = 0.5;

/// Maximum debris particles per impact.
pub const DEBRIS_MAX_COUNT: usize = 10;

/// Debris launch speed per unit of impact force.
pub const DEBRIS_SPEED_PER_FORCE: f64 = 1.5;

/// Debris lifetime in seconds.
pub const DEBRIS_LIFETIME_SECS: f64 = 1.2;

// --- Path interpolation ---

/// Minimum path duration regardless of distance.
pub const PATH_MIN_DURATION_SECS: f64 = 1.0;

/// Remaining distance at which a path counts as complete.
pub const PATH_ARRIVAL_RADIUS: f64 = 5.0;

// --- Waves ---

/// Intermission between wave completion and the next wave start.
pub const WAVE_INTERMISSION_SECS: f64 = 5.0;

/// Default wave count before the game completes.
pub const MAX_WAVES_DEFAULT: u32 = 15;

/// Hard cap on threats in a single wave.
pub const WAVE_MAX_THREATS: u32 = 20;

/// Base spawn interval at wave 1, before scaling.
pub const SPAWN_INTERVAL_BASE_SECS: f64 = 1.5;

/// Spawn interval reduction per wave.
pub const SPAWN_INTERVAL_STEP_SECS: f64 = 0.05;

/// Spawn interval floor.
pub const SPAWN_INTERVAL_FLOOR_SECS: f64 = 0.8;

// --- Difficulty scaling ---

/// Per-wave growth step shared by speed/health/damage multipliers.
pub const DIFFICULTY_STEP: f64 = 0.15;

/// Per-wave growth step for the spawn-rate multiplier.
pub const SPAWN_RATE_STEP: f64 = 0.05;

/// Per-wave growth step for the special-ability chance.
pub const SPECIAL_CHANCE_STEP: f64 = 0.03;

pub const SPEED_MULT_CAP: f64 = 3.0;
pub const HEALTH_MULT_CAP: f64 = 5.0;
pub const DAMAGE_MULT_CAP: f64 = 4.0;
pub const SPAWN_RATE_CAP: f64 = 2.0;
pub const SPECIAL_CHANCE_CAP: f64 = 0.5;

// --- Events ---

/// Rolling event history kept by the bus.
pub const EVENT_HISTORY_LIMIT: usize = 1000;
