//! Tests for the shared vocabulary: catalogue coverage, event metadata,
//! and geometric helpers.

use glam::DVec2;

use crate::catalog::Catalog;
use crate::entities::{ThreatEntity, Trail};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{aim, bearing, EntityId};

const ALL_THREATS: [ThreatKind; 7] = [
    ThreatKind::Drone,
    ThreatKind::Swarm,
    ThreatKind::Stealth,
    ThreatKind::Kamikaze,
    ThreatKind::Boss,
    ThreatKind::Radar,
    ThreatKind::Heavy,
];

#[test]
fn catalog_covers_every_threat_kind() {
    let catalog = Catalog::standard();
    for kind in ALL_THREATS {
        let spec = catalog.threat(kind);
        assert_eq!(spec.kind, kind);
        assert!(spec.speed > 0.0);
        assert!(spec.health > 0.0);
        assert!(spec.points > 0);
    }
}

#[test]
fn catalog_has_exactly_three_countermeasures() {
    let catalog = Catalog::standard();
    assert_eq!(catalog.countermeasures.len(), 3);

    let kinetic = catalog.countermeasure(WeaponKind::Kinetic);
    assert_eq!(kinetic.rounds, Some(20));
    assert!(!kinetic.auto_engage);

    let ew = catalog.countermeasure(WeaponKind::Electronic);
    assert_eq!(ew.rounds, None);
    assert!(ew.auto_engage);
    assert!(ew.cooldown_secs > kinetic.cooldown_secs);

    let laser = catalog.countermeasure(WeaponKind::Laser);
    assert!(laser.cooldown_secs < kinetic.cooldown_secs);
    assert!(laser.rounds.unwrap() > kinetic.rounds.unwrap());
}

#[test]
fn effectiveness_stays_in_unit_interval() {
    let catalog = Catalog::standard();
    for cm in &catalog.countermeasures {
        for kind in ALL_THREATS {
            let e = cm.effectiveness(kind);
            assert!((0.0..=1.0).contains(&e), "{:?} vs {kind:?}: {e}", cm.weapon);
        }
    }
}

#[test]
fn weakness_is_the_best_countermeasure() {
    let catalog = Catalog::standard();
    for kind in ALL_THREATS {
        let weakness = catalog.threat(kind).weakness;
        let best = catalog.countermeasure(weakness).effectiveness(kind);
        for cm in &catalog.countermeasures {
            assert!(
                cm.effectiveness(kind) <= best,
                "{kind:?}: {:?} beats declared weakness {weakness:?}",
                cm.weapon
            );
        }
    }
}

#[test]
fn event_priorities_match_catalogue() {
    let fired = GameEvent::WeaponFired {
        weapon: WeaponKind::Kinetic,
        target: EntityId(3),
        projectile: None,
    };
    assert_eq!(fired.priority(), 5);
    assert_eq!(fired.target(), Some(EntityId(3)));

    let critical = GameEvent::ResourceCritical {
        resource: ResourceKind::Energy,
        value: 5.0,
    };
    assert_eq!(critical.priority(), 5);

    let changed = GameEvent::ResourceChanged {
        energy: 80.0,
        ammunition: 100,
    };
    assert_eq!(changed.priority(), 2);
}

#[test]
fn trail_is_bounded_and_newest_first() {
    let mut trail = Trail::default();
    for i in 0..15 {
        trail.record(DVec2::new(i as f64, 0.0));
    }
    assert_eq!(trail.positions.len(), crate::constants::THREAT_TRAIL_LEN);
    assert_eq!(trail.positions[0], DVec2::new(14.0, 0.0));
}

#[test]
fn shield_factor_multiplies_shield_traits() {
    let mut threat = ThreatEntity::default();
    assert_eq!(threat.shield_factor(), 1.0);

    threat.specials.push(SpecialTrait::Shielded { damage_factor: 0.5 });
    threat
        .specials
        .push(SpecialTrait::Accelerated { speed_factor: 1.3 });
    assert!((threat.shield_factor() - 0.5).abs() < 1e-12);
}

#[test]
fn aim_produces_requested_speed() {
    let v = aim(DVec2::ZERO, DVec2::new(30.0, 40.0), 10.0);
    assert!((v.length() - 10.0).abs() < 1e-9);
    assert!((v.x - 6.0).abs() < 1e-9);
    assert!((v.y - 8.0).abs() < 1e-9);
}

#[test]
fn aim_coincident_points_never_nan() {
    let v = aim(DVec2::ONE, DVec2::ONE, 5.0);
    assert!(v.x.is_finite() && v.y.is_finite());
    assert!((v.length() - 5.0).abs() < 1e-9);
}

#[test]
fn events_serialize_with_type_tag() {
    let event = GameEvent::ThreatSpawned {
        id: EntityId(7),
        kind: ThreatKind::Stealth,
        position: DVec2::new(10.0, 20.0),
    };
    let json = serde_json::to_string(&event).expect("serialize");
    assert!(json.contains("\"type\":\"ThreatSpawned\""));

    let back: GameEvent = serde_json::from_str(&json).expect("deserialize");
    assert!(matches!(
        back,
        GameEvent::ThreatSpawned {
            id: EntityId(7),
            kind: ThreatKind::Stealth,
            ..
        }
    ));
}

#[test]
fn bearing_north_is_zero() {
    let b = bearing(DVec2::ZERO, DVec2::new(0.0, 10.0));
    assert!(b.abs() < 1e-9);
    let east = bearing(DVec2::ZERO, DVec2::new(10.0, 0.0));
    assert!((east - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}
