//! Automatic movement engine.
//!
//! Invoked once per refresh cycle. A single timer gate throttles it: if
//! automatic movement is disabled or less than `interval` time units have
//! passed since the last run, nothing happens. Otherwise every member of
//! every running room gets a `move_probability` chance to walk to one of
//! the other zones, and each move re-runs the evaluators.

use heightwatch_logic::constants::Zone;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// Default throttle between movement rounds (time units).
pub const MOVE_INTERVAL: f64 = 20.0;

/// Default chance that a member moves in a round.
pub const MOVE_PROBABILITY: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub enabled: bool,
    pub interval: f64,
    pub move_probability: f64,
    /// Fixed RNG seed for reproducible sessions. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: MOVE_INTERVAL,
            move_probability: MOVE_PROBABILITY,
            seed: None,
        }
    }
}

/// Outcome of one movement round that passed the gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub rooms_visited: usize,
    pub moves: usize,
    pub new_risks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementEngine {
    enabled: bool,
    interval: f64,
    move_probability: f64,
    last_run: f64,
    rounds: u64,
}

impl MovementEngine {
    /// Create an engine whose timer starts at `now`.
    pub fn new(config: &EngineConfig, now: f64) -> Self {
        Self {
            enabled: config.enabled,
            interval: config.interval,
            move_probability: config.move_probability.clamp(0.0, 1.0),
            last_run: now,
            rounds: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn last_run(&self) -> f64 {
        self.last_run
    }

    /// Number of rounds that passed the gate.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Whether a tick at `now` would pass the gate.
    pub fn is_due(&self, now: f64) -> bool {
        self.enabled && now - self.last_run >= self.interval
    }

    /// Run the gate and, if open, one movement round. Returns whether any
    /// participant moved.
    pub fn tick(&mut self, registry: &mut Registry, now: f64, rng: &mut impl Rng) -> bool {
        self.tick_with_summary(registry, now, rng)
            .is_some_and(|summary| summary.moves > 0)
    }

    /// Like [`tick`](Self::tick) but reports the round. `None` means the
    /// gate was closed and no state changed.
    pub fn tick_with_summary(
        &mut self,
        registry: &mut Registry,
        now: f64,
        rng: &mut impl Rng,
    ) -> Option<RoundSummary> {
        if !self.is_due(now) {
            return None;
        }

        let summary = self.run_round(registry, now, rng);
        self.last_run = now;
        self.rounds += 1;

        if summary.moves > 0 {
            log::info!(
                "Movement round {}: {} moves across {} rooms, {} new risks",
                self.rounds,
                summary.moves,
                summary.rooms_visited,
                summary.new_risks
            );
        }
        Some(summary)
    }

    fn run_round(&self, registry: &mut Registry, now: f64, rng: &mut impl Rng) -> RoundSummary {
        let mut summary = RoundSummary::default();
        let Registry {
            rooms,
            participants,
        } = registry;

        for room in rooms.iter().filter(|r| r.simulation_started) {
            summary.rooms_visited += 1;

            for member in &room.members {
                let Some(participant) = participants.get_mut(member) else {
                    log::warn!("Room {} lists unknown participant {}", room.code, member);
                    continue;
                };

                if rng.gen::<f64>() >= self.move_probability {
                    continue;
                }

                let destinations = participant.zone.others();
                let to: Zone = destinations[rng.gen_range(0..destinations.len())];
                let from = participant.zone;
                let added = participant.relocate_to(to, now);

                log::debug!(
                    "{} moved {} -> {} ({} new risks)",
                    participant.profile.name,
                    from.name(),
                    to.name(),
                    added
                );
                summary.moves += 1;
                summary.new_risks += added;
            }
        }

        summary
    }
}
