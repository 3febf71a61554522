//! Per-wave weather generation.
//!
//! Early waves are always clear. From `WEATHER_FIRST_WAVE` on, storm
//! probability grows with the wave number. Wind direction comes from the
//! seeded RNG, so a given seed replays the same campaign weather.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyshield_core::entities::WeatherState;
use skyshield_core::enums::WeatherCondition;

/// Waves below this are always clear.
const WEATHER_FIRST_WAVE: u32 = 4;

/// Wind speed (units/s) per condition.
const WIND_SPEED_OVERCAST: f64 = 6.0;
const WIND_SPEED_STORM: f64 = 18.0;
const WIND_SPEED_SEVERE: f64 = 32.0;

/// Generate weather for a wave.
pub fn generate_weather(rng: &mut ChaCha8Rng, wave_number: u32) -> WeatherState {
    if wave_number < WEATHER_FIRST_WAVE {
        return WeatherState::default();
    }

    let waves_past = (wave_number - WEATHER_FIRST_WAVE) as f64;
    // Severe is a subset of the storm band; overcast fills the gap.
    let severe_chance = (0.05 + waves_past * 0.01).min(0.20);
    let storm_chance = (0.15 + waves_past * 0.03).min(0.50);
    let overcast_chance = 0.30;

    let roll: f64 = rng.gen();
    let condition = if roll < severe_chance {
        WeatherCondition::Severe
    } else if roll < severe_chance + storm_chance {
        WeatherCondition::Storm
    } else if roll < severe_chance + storm_chance + overcast_chance {
        WeatherCondition::Overcast
    } else {
        WeatherCondition::Clear
    };

    let (intensity, wind_speed) = match condition {
        WeatherCondition::Clear => (0.0, 0.0),
        WeatherCondition::Overcast => (0.3, WIND_SPEED_OVERCAST),
        WeatherCondition::Storm => (0.7, WIND_SPEED_STORM),
        WeatherCondition::Severe => (1.0, WIND_SPEED_SEVERE),
    };

    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    WeatherState {
        condition,
        intensity,
        wind: DVec2::new(angle.cos(), angle.sin()) * wind_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn clear_before_threshold_wave() {
        for wave in 1..WEATHER_FIRST_WAVE {
            let mut rng = ChaCha8Rng::seed_from_u64(wave as u64);
            let weather = generate_weather(&mut rng, wave);
            assert_eq!(weather.condition, WeatherCondition::Clear);
            assert_eq!(weather.wind, DVec2::ZERO);
        }
    }

    #[test]
    fn deterministic_per_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for wave in 4..20 {
            assert_eq!(
                generate_weather(&mut a, wave),
                generate_weather(&mut b, wave)
            );
        }
    }

    #[test]
    fn wind_matches_condition_severity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for wave in 4..60 {
            let weather = generate_weather(&mut rng, wave);
            let speed = weather.wind.length();
            match weather.condition {
                WeatherCondition::Clear => assert_eq!(speed, 0.0),
                WeatherCondition::Overcast => assert!((speed - WIND_SPEED_OVERCAST).abs() < 1e-9),
                WeatherCondition::Storm => assert!((speed - WIND_SPEED_STORM).abs() < 1e-9),
                WeatherCondition::Severe => assert!((speed - WIND_SPEED_SEVERE).abs() < 1e-9),
            }
            assert!(weather.intensity >= 0.0 && weather.intensity <= 1.0);
        }
    }

    #[test]
    fn storms_occur_in_late_waves() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut stormy = 0;
        for _ in 0..200 {
            let weather = generate_weather(&mut rng, 30);
            if matches!(
                weather.condition,
                WeatherCondition::Storm | WeatherCondition::Severe
            ) {
                stormy += 1;
            }
        }
        // Storm + severe chance is capped at 0.70; expect a healthy share.
        assert!(stormy > 60, "only {stormy}/200 stormy waves");
    }
}
