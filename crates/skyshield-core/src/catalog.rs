//! Immutable tuning catalogue.
//!
//! Consolidates per-kind parameters for threats, countermeasures, and
//! friendly drones. A `Catalog` is built once at startup and passed into
//! the engine by reference — never read from module-level globals — so
//! multiple simulations can run with different tuning side by side.

use serde::Serialize;

use crate::enums::*;

/// Static parameters for one threat kind.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatSpec {
    pub kind: ThreatKind,
    /// Display glyph for HUD legends.
    pub icon: &'static str,
    /// Display color for HUD legends.
    pub color: &'static str,
    /// Cruise speed (units/s) before wave scaling.
    pub speed: f64,
    /// Hit points before wave scaling.
    pub health: f64,
    /// Score credited on a combat kill.
    pub points: u64,
    /// The countermeasure this kind is most vulnerable to.
    pub weakness: WeaponKind,
    pub behavior: MovementBehavior,
    pub priority: TargetPriority,
    /// Collision radius.
    pub radius: f64,
    /// Mass used by the impact damage heuristic.
    pub mass: f64,
}

/// Static parameters for one countermeasure.
#[derive(Debug, Clone, Serialize)]
pub struct CountermeasureSpec {
    pub weapon: WeaponKind,
    pub name: &'static str,
    /// Engagement range.
    pub range: f64,
    /// Cooldown between firings, in seconds.
    pub cooldown_secs: f64,
    /// Magazine size; `None` means unlimited.
    pub rounds: Option<u32>,
    /// Whether this countermeasure engages on its own once a threat is in
    /// range, without a fire command.
    pub auto_engage: bool,
    /// Per-threat-kind effectiveness multipliers in [0, 1].
    effectiveness: &'static [(ThreatKind, f64)],
}

impl CountermeasureSpec {
    /// Effectiveness against `kind`. Kinds absent from the table get a
    /// weak baseline rather than zero, so no fire is ever a full no-op.
    pub fn effectiveness(&self, kind: ThreatKind) -> f64 {
        self.effectiveness
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, e)| *e)
            .unwrap_or(0.25)
    }
}

/// Static parameters for one friendly drone kind.
#[derive(Debug, Clone, Serialize)]
pub struct DroneSpec {
    pub kind: DroneKind,
    /// Flight speed (units/s).
    pub speed: f64,
    pub max_health: f64,
    pub max_energy: f64,
    /// Range at which a patrolling drone switches to intercept.
    pub detection_range: f64,
    pub radius: f64,
    pub mass: f64,
}

/// The complete tuning catalogue handed to the engine at construction.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub threats: Vec<ThreatSpec>,
    pub countermeasures: Vec<CountermeasureSpec>,
    pub drones: Vec<DroneSpec>,
}

impl Catalog {
    /// The standard demo tuning.
    pub fn standard() -> Self {
        Self {
            threats: standard_threats(),
            countermeasures: standard_countermeasures(),
            drones: standard_drones(),
        }
    }

    pub fn threat(&self, kind: ThreatKind) -> &ThreatSpec {
        self.threats
            .iter()
            .find(|s| s.kind == kind)
            .unwrap_or(&self.threats[0])
    }

    pub fn countermeasure(&self, weapon: WeaponKind) -> &CountermeasureSpec {
        self.countermeasures
            .iter()
            .find(|s| s.weapon == weapon)
            .unwrap_or(&self.countermeasures[0])
    }

    pub fn drone(&self, kind: DroneKind) -> &DroneSpec {
        self.drones
            .iter()
            .find(|s| s.kind == kind)
            .unwrap_or(&self.drones[0])
    }
}

fn standard_threats() -> Vec<ThreatSpec> {
    vec![
        ThreatSpec {
            kind: ThreatKind::Drone,
            icon: "🛸",
            color: "#ef4444",
            speed: 60.0,
            health: 30.0,
            points: 100,
            weakness: WeaponKind::Kinetic,
            behavior: MovementBehavior::Direct,
            priority: TargetPriority::Normal,
            radius: 10.0,
            mass: 4.0,
        },
        ThreatSpec {
            kind: ThreatKind::Swarm,
            icon: "🐝",
            color: "#f59e0b",
            speed: 90.0,
            health: 15.0,
            points: 80,
            weakness: WeaponKind::Kinetic,
            behavior: MovementBehavior::Evasive,
            priority: TargetPriority::Normal,
            radius: 6.0,
            mass: 1.5,
        },
        ThreatSpec {
            kind: ThreatKind::Stealth,
            icon: "🛩",
            color: "#6b7280",
            speed: 80.0,
            health: 40.0,
            points: 200,
            weakness: WeaponKind::Laser,
            behavior: MovementBehavior::Evasive,
            priority: TargetPriority::High,
            radius: 9.0,
            mass: 5.0,
        },
        ThreatSpec {
            kind: ThreatKind::Kamikaze,
            icon: "💥",
            color: "#dc2626",
            speed: 120.0,
            health: 20.0,
            points: 150,
            weakness: WeaponKind::Kinetic,
            behavior: MovementBehavior::Direct,
            priority: TargetPriority::High,
            radius: 8.0,
            mass: 3.0,
        },
        ThreatSpec {
            kind: ThreatKind::Boss,
            icon: "👾",
            color: "#7c3aed",
            speed: 20.0,
            health: 400.0,
            points: 1000,
            weakness: WeaponKind::Laser,
            behavior: MovementBehavior::Direct,
            priority: TargetPriority::High,
            radius: 22.0,
            mass: 40.0,
        },
        ThreatSpec {
            kind: ThreatKind::Radar,
            icon: "📡",
            color: "#0ea5e9",
            speed: 30.0,
            health: 50.0,
            points: 150,
            weakness: WeaponKind::Electronic,
            behavior: MovementBehavior::Direct,
            priority: TargetPriority::Low,
            radius: 12.0,
            mass: 8.0,
        },
        ThreatSpec {
            kind: ThreatKind::Heavy,
            icon: "🚁",
            color: "#374151",
            speed: 25.0,
            health: 120.0,
            points: 300,
            weakness: WeaponKind::Laser,
            behavior: MovementBehavior::Direct,
            priority: TargetPriority::Normal,
            radius: 16.0,
            mass: 20.0,
        },
    ]
}

fn standard_countermeasures() -> Vec<CountermeasureSpec> {
    vec![
        CountermeasureSpec {
            weapon: WeaponKind::Kinetic,
            name: "Kinetic Interceptor",
            range: 250.0,
            cooldown_secs: 1.0,
            rounds: Some(20),
            auto_engage: false,
            effectiveness: &[
                (ThreatKind::Drone, 0.9),
                (ThreatKind::Swarm, 0.95),
                (ThreatKind::Kamikaze, 0.85),
                (ThreatKind::Radar, 0.6),
                (ThreatKind::Stealth, 0.4),
                (ThreatKind::Heavy, 0.3),
                (ThreatKind::Boss, 0.35),
            ],
        },
        CountermeasureSpec {
            weapon: WeaponKind::Electronic,
            name: "EW Jammer",
            range: 180.0,
            cooldown_secs: 3.0,
            rounds: None,
            auto_engage: true,
            effectiveness: &[
                (ThreatKind::Radar, 0.95),
                (ThreatKind::Drone, 0.7),
                (ThreatKind::Swarm, 0.6),
                (ThreatKind::Stealth, 0.5),
                (ThreatKind::Kamikaze, 0.5),
                (ThreatKind::Heavy, 0.2),
                (ThreatKind::Boss, 0.25),
            ],
        },
        CountermeasureSpec {
            weapon: WeaponKind::Laser,
            name: "Directed Energy",
            range: 320.0,
            cooldown_secs: 0.5,
            rounds: Some(500),
            auto_engage: false,
            effectiveness: &[
                (ThreatKind::Stealth, 0.9),
                (ThreatKind::Heavy, 0.85),
                (ThreatKind::Boss, 0.8),
                (ThreatKind::Kamikaze, 0.7),
                (ThreatKind::Drone, 0.6),
                (ThreatKind::Radar, 0.5),
                (ThreatKind::Swarm, 0.4),
            ],
        },
    ]
}

fn standard_drones() -> Vec<DroneSpec> {
    vec![
        DroneSpec {
            kind: DroneKind::Interceptor,
            speed: 140.0,
            max_health: 60.0,
            max_energy: 100.0,
            detection_range: 160.0,
            radius: 8.0,
            mass: 6.0,
        },
        DroneSpec {
            kind: DroneKind::Jammer,
            speed: 100.0,
            max_health: 45.0,
            max_energy: 120.0,
            detection_range: 200.0,
            radius: 8.0,
            mass: 5.0,
        },
        DroneSpec {
            kind: DroneKind::Scout,
            speed: 170.0,
            max_health: 30.0,
            max_energy: 140.0,
            detection_range: 260.0,
            radius: 6.0,
            mass: 3.0,
        },
    ]
}
