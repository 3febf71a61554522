//! Scenario presets: named campaigns with pre-built wave sequences.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::enums::TerrainKind;

use crate::composer::{compose_wave, WaveConfig};
use crate::manager::WaveManagerConfig;
use crate::weather::generate_weather;

/// A named campaign difficulty profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioPreset {
    pub name: &'static str,
    pub base_difficulty: f64,
    pub max_waves: u32,
    pub terrain: TerrainKind,
}

impl ScenarioPreset {
    pub fn tutorial() -> Self {
        Self {
            name: "tutorial",
            base_difficulty: 0.5,
            max_waves: 3,
            terrain: TerrainKind::Open,
        }
    }

    pub fn easy() -> Self {
        Self {
            name: "easy",
            base_difficulty: 0.75,
            max_waves: 8,
            terrain: TerrainKind::Open,
        }
    }

    pub fn medium() -> Self {
        Self {
            name: "medium",
            base_difficulty: 1.0,
            max_waves: 15,
            terrain: TerrainKind::Urban,
        }
    }

    pub fn hard() -> Self {
        Self {
            name: "hard",
            base_difficulty: 1.5,
            max_waves: 20,
            terrain: TerrainKind::Coastal,
        }
    }

    pub fn expert() -> Self {
        Self {
            name: "expert",
            base_difficulty: 2.0,
            max_waves: 25,
            terrain: TerrainKind::Mountain,
        }
    }

    pub fn all() -> [ScenarioPreset; 5] {
        [
            Self::tutorial(),
            Self::easy(),
            Self::medium(),
            Self::hard(),
            Self::expert(),
        ]
    }

    /// Pre-build the full wave sequence for this preset.
    pub fn waves(&self, seed: u64) -> Vec<WaveConfig> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (1..=self.max_waves)
            .map(|n| {
                let weather = generate_weather(&mut rng, n);
                compose_wave(n, self.base_difficulty, weather, self.terrain)
            })
            .collect()
    }

    /// A manager config driving this preset.
    pub fn manager_config(&self, seed: u64) -> WaveManagerConfig {
        WaveManagerConfig {
            base_difficulty: self.base_difficulty,
            max_waves: self.max_waves,
            terrain: self.terrain,
            seed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_escalate_in_difficulty() {
        let all = ScenarioPreset::all();
        for pair in all.windows(2) {
            assert!(pair[1].base_difficulty > pair[0].base_difficulty);
            assert!(pair[1].max_waves > pair[0].max_waves);
        }
    }

    #[test]
    fn preset_wave_sequences_are_complete() {
        for preset in ScenarioPreset::all() {
            let waves = preset.waves(7);
            assert_eq!(waves.len(), preset.max_waves as usize, "{}", preset.name);
            for (i, wave) in waves.iter().enumerate() {
                assert_eq!(wave.wave_number, i as u32 + 1);
                assert!(wave.total_threats > 0, "{} wave {}", preset.name, i + 1);
                assert_eq!(wave.terrain, preset.terrain);
            }
        }
    }

    #[test]
    fn tutorial_is_gentle() {
        let waves = ScenarioPreset::tutorial().waves(7);
        // Half base difficulty: wave 1 is floor(5 * 0.5) = 2 threats.
        assert_eq!(waves[0].total_threats, 2);
        assert!(waves.iter().all(|w| w.total_threats <= 5));
    }

    #[test]
    fn preset_sequences_are_deterministic_per_seed() {
        let a = ScenarioPreset::hard().waves(123);
        let b = ScenarioPreset::hard().waves(123);
        assert_eq!(a, b);
    }
}
