//! Per-wave difficulty scaling.
//!
//! Pure functions of the wave number. Every multiplier is monotonically
//! non-decreasing in the wave number and clamped to its cap.

use serde::{Deserialize, Serialize};

use skyshield_core::constants::*;

/// Multipliers applied to threats spawned during one wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMods {
    pub speed: f64,
    pub health: f64,
    pub damage: f64,
    pub spawn_rate: f64,
    /// Chance per spawn of rolling a special trait.
    pub special_chance: f64,
}

/// Compute the difficulty multipliers for wave `n` (1-based).
pub fn difficulty_for_wave(n: u32) -> DifficultyMods {
    let steps = n.saturating_sub(1) as f64;
    let base = 1.0 + steps * DIFFICULTY_STEP;
    DifficultyMods {
        speed: (base * 0.67).min(SPEED_MULT_CAP),
        health: (base * 1.33).min(HEALTH_MULT_CAP),
        damage: base.min(DAMAGE_MULT_CAP),
        spawn_rate: (1.0 + steps * SPAWN_RATE_STEP).min(SPAWN_RATE_CAP),
        special_chance: (steps * SPECIAL_CHANCE_STEP).min(SPECIAL_CHANCE_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_one_is_baseline() {
        let mods = difficulty_for_wave(1);
        assert!((mods.speed - 0.67).abs() < 1e-12);
        assert!((mods.health - 1.33).abs() < 1e-12);
        assert!((mods.damage - 1.0).abs() < 1e-12);
        assert!((mods.spawn_rate - 1.0).abs() < 1e-12);
        assert_eq!(mods.special_chance, 0.0);
    }

    #[test]
    fn multipliers_are_monotone_and_capped() {
        let mut prev = difficulty_for_wave(1);
        for n in 2..200 {
            let mods = difficulty_for_wave(n);
            assert!(mods.speed >= prev.speed, "speed dipped at wave {n}");
            assert!(mods.health >= prev.health, "health dipped at wave {n}");
            assert!(mods.damage >= prev.damage, "damage dipped at wave {n}");
            assert!(mods.spawn_rate >= prev.spawn_rate, "spawn rate dipped at wave {n}");
            assert!(
                mods.special_chance >= prev.special_chance,
                "special chance dipped at wave {n}"
            );

            assert!(mods.speed <= SPEED_MULT_CAP);
            assert!(mods.health <= HEALTH_MULT_CAP);
            assert!(mods.damage <= DAMAGE_MULT_CAP);
            assert!(mods.spawn_rate <= SPAWN_RATE_CAP);
            assert!(mods.special_chance <= SPECIAL_CHANCE_CAP);
            prev = mods;
        }
    }

    #[test]
    fn caps_are_reached_eventually() {
        let late = difficulty_for_wave(150);
        assert_eq!(late.speed, SPEED_MULT_CAP);
        assert_eq!(late.health, HEALTH_MULT_CAP);
        assert_eq!(late.damage, DAMAGE_MULT_CAP);
        assert_eq!(late.spawn_rate, SPAWN_RATE_CAP);
        assert_eq!(late.special_chance, SPECIAL_CHANCE_CAP);
    }
}
