//! Time-phased threat delivery.
//!
//! `WaveManager` turns wave configs into a timestamp-sorted spawn queue
//! and fires due spawns through the `on_spawn` callback as it is polled.
//! A wave completes once its queue is drained and the host has reported
//! every spawned threat defeated; after a fixed intermission the next
//! wave starts on its own. Completing the final wave invokes
//! `on_game_complete` instead.
//!
//! The manager never touches engine state — callbacks are its only
//! outbound channel. Callers must invoke `defeat_threat` exactly once per
//! neutralized spawned threat; the manager does not enforce the
//! defeated <= spawned invariant and remaining counts saturate at zero.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use skyshield_core::constants::{MAX_WAVES_DEFAULT, WAVE_INTERMISSION_SECS};
use skyshield_core::enums::{SpecialTrait, TerrainKind, ThreatKind};

use crate::composer::{compose_wave, WaveConfig};
use crate::weather::generate_weather;

/// A spawn instruction delivered through `on_spawn`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnOrder {
    pub wave: u32,
    pub kind: ThreatKind,
    pub speed_mult: f64,
    pub health_mult: f64,
    pub damage_mult: f64,
    pub special: Option<SpecialTrait>,
}

/// Progress of the wave currently in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveProgress {
    pub wave_number: u32,
    pub threats_total: u32,
    pub threats_spawned: u32,
    pub threats_defeated: u32,
    /// Threats left to defeat before the wave can complete.
    pub threats_remaining: u32,
    /// Spawns still queued.
    pub spawns_pending: u32,
    /// True while waiting out the intermission before the next wave.
    pub intermission: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct WaveManagerConfig {
    pub base_difficulty: f64,
    pub max_waves: u32,
    pub intermission_secs: f64,
    pub terrain: TerrainKind,
    /// RNG seed for weather and special-trait rolls.
    pub seed: u64,
}

impl Default for WaveManagerConfig {
    fn default() -> Self {
        Self {
            base_difficulty: 1.0,
            max_waves: MAX_WAVES_DEFAULT,
            intermission_secs: WAVE_INTERMISSION_SECS,
            terrain: TerrainKind::Open,
            seed: 42,
        }
    }
}

/// Host callbacks. `on_spawn` fires once per due spawn, in timestamp
/// order; the others fire at most once per wave / per game.
pub struct WaveCallbacks {
    pub on_spawn: Box<dyn FnMut(SpawnOrder)>,
    pub on_wave_complete: Box<dyn FnMut(u32)>,
    pub on_game_complete: Box<dyn FnMut()>,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledSpawn {
    at: f64,
    kind: ThreatKind,
}

#[derive(Debug)]
struct ActiveWave {
    config: WaveConfig,
    pending: VecDeque<ScheduledSpawn>,
    spawned: u32,
    defeated: u32,
}

pub struct WaveManager {
    config: WaveManagerConfig,
    callbacks: WaveCallbacks,
    rng: ChaCha8Rng,
    current: Option<ActiveWave>,
    /// Absolute time the next wave starts (intermission timer).
    next_wave_at: Option<f64>,
    next_wave_number: u32,
    paused: bool,
    paused_at: f64,
    game_complete: bool,
}

impl WaveManager {
    pub fn new(config: WaveManagerConfig, callbacks: WaveCallbacks) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            callbacks,
            current: None,
            next_wave_at: None,
            next_wave_number: 1,
            paused: false,
            paused_at: 0.0,
            game_complete: false,
        }
    }

    /// Compose wave `n` and queue its spawns from `now`. Each spawn is
    /// timestamped wave start + group delay + index * interval, and the
    /// merged schedule is sorted by timestamp.
    pub fn start_wave(&mut self, n: u32, now: f64) {
        let weather = generate_weather(&mut self.rng, n);
        let config = compose_wave(n, self.config.base_difficulty, weather, self.config.terrain);

        let mut schedule: Vec<ScheduledSpawn> = Vec::with_capacity(config.total_threats as usize);
        for group in &config.groups {
            for i in 0..group.count {
                schedule.push(ScheduledSpawn {
                    at: now + group.delay_secs + i as f64 * config.spawn_interval_secs,
                    kind: group.kind,
                });
            }
        }
        schedule.sort_by(|a, b| a.at.total_cmp(&b.at));

        self.current = Some(ActiveWave {
            config,
            pending: schedule.into(),
            spawned: 0,
            defeated: 0,
        });
        self.next_wave_at = None;
        self.next_wave_number = n + 1;
    }

    /// Poll the schedule: start a due next wave, fire due spawns, complete
    /// the wave once drained and fully defeated.
    pub fn update(&mut self, now: f64) {
        if self.paused || self.game_complete {
            return;
        }

        if let Some(at) = self.next_wave_at {
            if now >= at {
                self.next_wave_at = None;
                self.start_wave(self.next_wave_number, now);
            }
        }

        let Some(wave) = self.current.as_mut() else {
            return;
        };

        let mut due: Vec<ThreatKind> = Vec::new();
        while wave.pending.front().is_some_and(|s| s.at <= now) {
            if let Some(spawn) = wave.pending.pop_front() {
                due.push(spawn.kind);
            }
        }
        wave.spawned += due.len() as u32;

        let wave_number = wave.config.wave_number;
        let mods = wave.config.difficulty;
        for kind in due {
            let special = roll_special(&mut self.rng, mods.special_chance);
            (self.callbacks.on_spawn)(SpawnOrder {
                wave: wave_number,
                kind,
                speed_mult: mods.speed,
                health_mult: mods.health,
                damage_mult: mods.damage,
                special,
            });
        }

        let completed = self
            .current
            .as_ref()
            .is_some_and(|w| w.pending.is_empty() && w.spawned > 0 && w.defeated >= w.spawned);
        if completed {
            self.finish_wave(now);
        }
    }

    /// Report one neutralized spawned threat. Must be called exactly once
    /// per kill; the manager does not detect over-reporting.
    pub fn defeat_threat(&mut self) {
        if let Some(wave) = self.current.as_mut() {
            wave.defeated += 1;
        }
    }

    /// Abandon the rest of the current wave and complete it immediately.
    pub fn skip_wave(&mut self, now: f64) {
        if let Some(wave) = self.current.as_mut() {
            wave.pending.clear();
            wave.defeated = wave.defeated.max(wave.spawned);
            self.finish_wave(now);
        }
    }

    /// Freeze the schedule. Spawn and intermission timestamps resume
    /// shifted by the pause duration.
    pub fn pause_wave(&mut self, now: f64) {
        if !self.paused {
            self.paused = true;
            self.paused_at = now;
        }
    }

    pub fn resume_wave(&mut self, now: f64) {
        if !self.paused {
            return;
        }
        self.paused = false;
        let shift = now - self.paused_at;
        if let Some(wave) = self.current.as_mut() {
            for spawn in wave.pending.iter_mut() {
                spawn.at += shift;
            }
        }
        if let Some(at) = self.next_wave_at.as_mut() {
            *at += shift;
        }
    }

    pub fn get_progress(&self) -> WaveProgress {
        match &self.current {
            Some(wave) => WaveProgress {
                wave_number: wave.config.wave_number,
                threats_total: wave.config.total_threats,
                threats_spawned: wave.spawned,
                threats_defeated: wave.defeated,
                threats_remaining: wave.config.total_threats.saturating_sub(wave.defeated),
                spawns_pending: wave.pending.len() as u32,
                intermission: false,
            },
            None => WaveProgress {
                // Between waves the last completed wave number is
                // next_wave_number - 1.
                wave_number: self.next_wave_number.saturating_sub(1),
                intermission: self.next_wave_at.is_some(),
                ..WaveProgress::default()
            },
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_complete(&self) -> bool {
        self.game_complete
    }

    /// The config of the wave in flight, if any.
    pub fn current_wave(&self) -> Option<&WaveConfig> {
        self.current.as_ref().map(|w| &w.config)
    }

    /// Return to the pre-`start_wave` state and reseed the RNG.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.current = None;
        self.next_wave_at = None;
        self.next_wave_number = 1;
        self.paused = false;
        self.game_complete = false;
    }

    fn finish_wave(&mut self, now: f64) {
        let Some(wave) = self.current.take() else {
            return;
        };
        let n = wave.config.wave_number;
        (self.callbacks.on_wave_complete)(n);

        if n >= self.config.max_waves {
            self.game_complete = true;
            (self.callbacks.on_game_complete)();
        } else {
            self.next_wave_number = n + 1;
            self.next_wave_at = Some(now + self.config.intermission_secs);
        }
    }
}

fn roll_special(rng: &mut ChaCha8Rng, chance: f64) -> Option<SpecialTrait> {
    if chance > 0.0 && rng.gen_bool(chance.clamp(0.0, 1.0)) {
        if rng.gen_bool(0.5) {
            Some(SpecialTrait::Shielded { damage_factor: 0.5 })
        } else {
            Some(SpecialTrait::Accelerated { speed_factor: 1.4 })
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Capture {
        spawns: Vec<SpawnOrder>,
        completed: Vec<u32>,
        game_complete: bool,
    }

    fn manager_with_capture(config: WaveManagerConfig) -> (WaveManager, Rc<RefCell<Capture>>) {
        let capture = Rc::new(RefCell::new(Capture::default()));
        let spawns = Rc::clone(&capture);
        let completed = Rc::clone(&capture);
        let game = Rc::clone(&capture);
        let manager = WaveManager::new(
            config,
            WaveCallbacks {
                on_spawn: Box::new(move |order| spawns.borrow_mut().spawns.push(order)),
                on_wave_complete: Box::new(move |n| completed.borrow_mut().completed.push(n)),
                on_game_complete: Box::new(move || game.borrow_mut().game_complete = true),
            },
        );
        (manager, capture)
    }

    /// Poll until the current wave's spawn queue is drained.
    fn drain_spawns(manager: &mut WaveManager, mut now: f64, step: f64) -> f64 {
        for _ in 0..10_000 {
            manager.update(now);
            if manager.get_progress().spawns_pending == 0 {
                return now;
            }
            now += step;
        }
        panic!("spawn queue never drained");
    }

    #[test]
    fn queued_spawns_match_config_counts() {
        let (mut manager, capture) = manager_with_capture(WaveManagerConfig::default());
        manager.start_wave(1, 0.0);

        let total = manager.current_wave().unwrap().total_threats;
        assert_eq!(manager.get_progress().spawns_pending, total);

        let now = drain_spawns(&mut manager, 0.0, 0.25);
        assert!(now >= 0.0);
        assert_eq!(capture.borrow().spawns.len(), total as usize);
        assert!(capture
            .borrow()
            .spawns
            .iter()
            .all(|o| o.kind == ThreatKind::Drone));
    }

    #[test]
    fn progress_decrements_per_defeat_down_to_zero() {
        let (mut manager, _capture) = manager_with_capture(WaveManagerConfig::default());
        manager.start_wave(1, 0.0);
        drain_spawns(&mut manager, 0.0, 0.25);

        let total = manager.get_progress().threats_total;
        for expected in (0..total).rev() {
            manager.defeat_threat();
            // The final defeat completes the wave; progress then reports
            // the between-waves state.
            if expected > 0 {
                assert_eq!(manager.get_progress().threats_remaining, expected);
            }
        }
        manager.update(100.0);
        assert_eq!(manager.get_progress().threats_remaining, 0);
    }

    #[test]
    fn wave_completes_only_after_all_defeats() {
        let (mut manager, capture) = manager_with_capture(WaveManagerConfig::default());
        manager.start_wave(1, 0.0);
        let now = drain_spawns(&mut manager, 0.0, 0.25);

        manager.update(now + 1.0);
        assert!(capture.borrow().completed.is_empty(), "undefeated wave completed");

        let total = manager.get_progress().threats_total;
        for _ in 0..total {
            manager.defeat_threat();
        }
        manager.update(now + 2.0);
        assert_eq!(capture.borrow().completed, vec![1]);
    }

    #[test]
    fn intermission_then_next_wave_autostarts() {
        let config = WaveManagerConfig {
            intermission_secs: 5.0,
            ..Default::default()
        };
        let (mut manager, capture) = manager_with_capture(config);
        manager.start_wave(1, 0.0);
        let now = drain_spawns(&mut manager, 0.0, 0.25);
        let total = manager.get_progress().threats_total;
        for _ in 0..total {
            manager.defeat_threat();
        }
        manager.update(now);
        assert_eq!(capture.borrow().completed, vec![1]);
        assert!(manager.get_progress().intermission);

        manager.update(now + 4.9);
        assert!(manager.current_wave().is_none(), "intermission not over");

        manager.update(now + 5.1);
        let wave = manager.current_wave().expect("wave 2 should have started");
        assert_eq!(wave.wave_number, 2);
    }

    #[test]
    fn final_wave_triggers_game_complete() {
        let config = WaveManagerConfig {
            max_waves: 2,
            ..Default::default()
        };
        let (mut manager, capture) = manager_with_capture(config);

        let mut now = 0.0;
        for expected_wave in 1..=2 {
            manager.start_wave(expected_wave, now);
            now = drain_spawns(&mut manager, now, 0.25);
            let total = manager.get_progress().threats_total;
            for _ in 0..total {
                manager.defeat_threat();
            }
            manager.update(now);
        }

        assert_eq!(capture.borrow().completed, vec![1, 2]);
        assert!(capture.borrow().game_complete);
        assert!(manager.is_game_complete());

        // A completed game never starts another wave on its own.
        manager.update(now + 1000.0);
        assert!(manager.current_wave().is_none());
    }

    #[test]
    fn pause_shifts_the_schedule() {
        let (mut manager, capture) = manager_with_capture(WaveManagerConfig::default());
        manager.start_wave(1, 0.0);
        manager.update(0.0);
        let spawned_before = capture.borrow().spawns.len();

        manager.pause_wave(0.5);
        manager.update(50.0);
        assert_eq!(
            capture.borrow().spawns.len(),
            spawned_before,
            "paused manager spawned"
        );

        manager.resume_wave(100.0);
        // Schedule shifted by ~99.5s; spawns resume on the shifted times.
        drain_spawns(&mut manager, 100.0, 0.25);
        let total = manager.get_progress().threats_total;
        assert_eq!(capture.borrow().spawns.len(), total as usize);
    }

    #[test]
    fn skip_wave_completes_immediately() {
        let (mut manager, capture) = manager_with_capture(WaveManagerConfig::default());
        manager.start_wave(1, 0.0);
        manager.update(0.0);

        manager.skip_wave(1.0);
        assert_eq!(capture.borrow().completed, vec![1]);
        assert!(manager.current_wave().is_none());
        assert!(manager.get_progress().intermission);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let (mut manager, _capture) = manager_with_capture(WaveManagerConfig::default());
        manager.start_wave(3, 0.0);
        manager.update(0.0);
        manager.reset();

        assert!(manager.current_wave().is_none());
        let progress = manager.get_progress();
        assert_eq!(progress.threats_spawned, 0);
        assert!(!progress.intermission);
        assert!(!manager.is_game_complete());
    }

    #[test]
    fn late_waves_roll_special_traits() {
        let config = WaveManagerConfig {
            base_difficulty: 2.0,
            ..Default::default()
        };
        let (mut manager, capture) = manager_with_capture(config);
        // Wave 18: special chance is capped at 0.5; with 20 spawns the odds
        // of zero specials are ~1e-6 for any seed.
        manager.start_wave(18, 0.0);
        drain_spawns(&mut manager, 0.0, 0.25);

        let specials = capture
            .borrow()
            .spawns
            .iter()
            .filter(|o| o.special.is_some())
            .count();
        assert!(specials > 0, "no special traits rolled in 20 spawns");
    }
}
