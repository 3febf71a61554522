//! Wave composition: which threats a wave contains and how fast they come.
//!
//! Threat kinds unlock at fixed wave thresholds, each taking a fixed share
//! of the wave's total. Per-group shares floor to whole threats; the drone
//! group then absorbs the rounding difference so group counts always sum
//! to the configured total exactly.

use serde::{Deserialize, Serialize};

use skyshield_core::constants::*;
use skyshield_core::entities::WeatherState;
use skyshield_core::enums::{TerrainKind, ThreatKind};

use crate::difficulty::{difficulty_for_wave, DifficultyMods};

/// One homogeneous batch within a wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub kind: ThreatKind,
    pub count: u32,
    /// Delay after wave start before this group begins spawning.
    pub delay_secs: f64,
}

/// Everything needed to run one wave. Regenerated from the wave number
/// each time; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub wave_number: u32,
    pub total_threats: u32,
    /// Interval between consecutive spawns within a group.
    pub spawn_interval_secs: f64,
    pub groups: Vec<SpawnGroup>,
    pub difficulty: DifficultyMods,
    pub weather: WeatherState,
    pub terrain: TerrainKind,
}

/// Unlock table: (kind, first wave, share of total, group delay).
const UNLOCKS: [(ThreatKind, u32, f64, f64); 4] = [
    (ThreatKind::Drone, 1, 0.60, 0.0),
    (ThreatKind::Swarm, 3, 0.30, 2.0),
    (ThreatKind::Stealth, 5, 0.20, 5.0),
    (ThreatKind::Kamikaze, 7, 0.10, 8.0),
];

/// Boss appears from this wave on, exactly one per wave.
const BOSS_FIRST_WAVE: u32 = 10;
const BOSS_DELAY_SECS: f64 = 10.0;

/// Compose the configuration for wave `n` at the given base difficulty.
pub fn compose_wave(
    n: u32,
    base_difficulty: f64,
    weather: WeatherState,
    terrain: TerrainKind,
) -> WaveConfig {
    let difficulty = difficulty_for_wave(n);
    let total = (((3 + 2 * n) as f64 * base_difficulty).floor() as u32).min(WAVE_MAX_THREATS);

    let mut groups: Vec<SpawnGroup> = UNLOCKS
        .iter()
        .filter(|(_, first_wave, _, _)| n >= *first_wave)
        .map(|&(kind, _, share, delay_secs)| SpawnGroup {
            kind,
            count: (total as f64 * share).floor() as u32,
            delay_secs,
        })
        .collect();

    if n >= BOSS_FIRST_WAVE && total > 0 {
        groups.push(SpawnGroup {
            kind: ThreatKind::Boss,
            count: 1,
            delay_secs: BOSS_DELAY_SECS,
        });
    }

    balance_counts(&mut groups, total);
    groups.retain(|g| g.count > 0);

    let interval_base =
        (SPAWN_INTERVAL_BASE_SECS - SPAWN_INTERVAL_STEP_SECS * n as f64).max(SPAWN_INTERVAL_FLOOR_SECS);
    let spawn_interval_secs = interval_base / (difficulty.spawn_rate * base_difficulty.max(0.1));

    WaveConfig {
        wave_number: n,
        total_threats: total,
        spawn_interval_secs,
        groups,
        difficulty,
        weather,
        terrain,
    }
}

/// Make group counts sum to `total` exactly: the drone group absorbs any
/// shortfall; overshoot is trimmed from the drone group first, then from
/// the tail groups.
fn balance_counts(groups: &mut [SpawnGroup], total: u32) {
    let assigned: u32 = groups.iter().map(|g| g.count).sum();

    if assigned < total {
        if let Some(drones) = groups.iter_mut().find(|g| g.kind == ThreatKind::Drone) {
            drones.count += total - assigned;
        }
        return;
    }

    let mut excess = assigned - total;
    if excess > 0 {
        if let Some(drones) = groups.iter_mut().find(|g| g.kind == ThreatKind::Drone) {
            let cut = excess.min(drones.count);
            drones.count -= cut;
            excess -= cut;
        }
    }
    for group in groups.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let cut = excess.min(group.count);
        group.count -= cut;
        excess -= cut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear() -> WeatherState {
        WeatherState::default()
    }

    fn wave(n: u32, base_difficulty: f64) -> WaveConfig {
        compose_wave(n, base_difficulty, clear(), TerrainKind::Open)
    }

    fn count_of(config: &WaveConfig, kind: ThreatKind) -> u32 {
        config
            .groups
            .iter()
            .filter(|g| g.kind == kind)
            .map(|g| g.count)
            .sum()
    }

    #[test]
    fn wave_one_is_five_drones() {
        let config = wave(1, 1.0);
        assert_eq!(config.total_threats, 5);
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].kind, ThreatKind::Drone);
        assert_eq!(config.groups[0].count, 5);
    }

    #[test]
    fn group_counts_always_sum_to_total() {
        for n in 1..40 {
            for &bd in &[0.5, 0.75, 1.0, 1.5, 2.0] {
                let config = wave(n, bd);
                let sum: u32 = config.groups.iter().map(|g| g.count).sum();
                assert_eq!(
                    sum, config.total_threats,
                    "wave {n} at difficulty {bd}: groups {:?}",
                    config.groups
                );
            }
        }
    }

    #[test]
    fn unlock_thresholds_gate_kinds() {
        assert_eq!(count_of(&wave(2, 1.0), ThreatKind::Swarm), 0);
        assert!(count_of(&wave(3, 1.0), ThreatKind::Swarm) > 0);

        assert_eq!(count_of(&wave(4, 1.0), ThreatKind::Stealth), 0);
        assert!(count_of(&wave(5, 1.0), ThreatKind::Stealth) > 0);

        assert_eq!(count_of(&wave(6, 1.0), ThreatKind::Kamikaze), 0);
        assert!(count_of(&wave(7, 1.0), ThreatKind::Kamikaze) > 0);
    }

    #[test]
    fn exactly_one_boss_from_wave_ten() {
        assert_eq!(count_of(&wave(9, 1.0), ThreatKind::Boss), 0);
        for n in 10..20 {
            assert_eq!(count_of(&wave(n, 1.0), ThreatKind::Boss), 1, "wave {n}");
        }
    }

    #[test]
    fn total_is_capped_at_twenty() {
        for n in 1..60 {
            assert!(wave(n, 2.0).total_threats <= WAVE_MAX_THREATS);
        }
        assert_eq!(wave(30, 2.0).total_threats, WAVE_MAX_THREATS);
    }

    #[test]
    fn spawn_interval_shrinks_with_wave_and_difficulty() {
        let early = wave(1, 1.0).spawn_interval_secs;
        let late = wave(12, 1.0).spawn_interval_secs;
        assert!(late < early);

        let hard = wave(1, 2.0).spawn_interval_secs;
        assert!(hard < early);
    }

    #[test]
    fn spawn_interval_respects_floor_before_rate_scaling() {
        // At wave 30 the unscaled interval has bottomed out at the floor.
        let config = wave(30, 1.0);
        let expected = SPAWN_INTERVAL_FLOOR_SECS / config.difficulty.spawn_rate;
        assert!((config.spawn_interval_secs - expected).abs() < 1e-12);
    }

    #[test]
    fn group_delays_follow_unlock_order() {
        let config = wave(12, 1.0);
        let mut last_delay = -1.0;
        for kind in [
            ThreatKind::Drone,
            ThreatKind::Swarm,
            ThreatKind::Stealth,
            ThreatKind::Kamikaze,
            ThreatKind::Boss,
        ] {
            if let Some(group) = config.groups.iter().find(|g| g.kind == kind) {
                assert!(group.delay_secs > last_delay, "{kind:?} out of order");
                last_delay = group.delay_secs;
            }
        }
    }
}
