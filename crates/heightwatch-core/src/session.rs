//! The classroom session: registry, movement engine, RNG, and clock.
//!
//! `Simulation` is the single writer. Every mutation goes through it and
//! is stamped with the current simulation time, which the caller advances
//! with [`Simulation::update`].

use heightwatch_logic::constants::Zone;
use heightwatch_logic::profile::ParticipantProfile;
use heightwatch_logic::room_config::RoomConfig;
use heightwatch_logic::sensors::SensorScenario;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, MovementEngine, RoundSummary};
use crate::error::Result;
use crate::generation::generate_profile;
use crate::registry::{Participant, ParticipantId, Registry, Room, RoomId};
use crate::sensors::{generate_trace, SensorTrace};

pub struct Simulation {
    registry: Registry,
    engine: MovementEngine,
    rng: StdRng,
    sim_time: f64,
    time_scale: f64,
}

impl Simulation {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            registry: Registry::new(),
            engine: MovementEngine::new(&config, 0.0),
            rng,
            sim_time: 0.0,
            time_scale: 1.0,
        }
    }

    // ── Rooms and participants ──────────────────────────────────────────

    pub fn create_room(&mut self, config: RoomConfig) -> Result<RoomId> {
        let room = self.registry.create_room(config, self.sim_time, &mut self.rng)?;
        Ok(room.id)
    }

    /// Join by user-typed code. Returns the new participant's id.
    pub fn join_room(&mut self, code: &str, profile: ParticipantProfile) -> Result<ParticipantId> {
        let participant = self.registry.join_room(code, profile, self.sim_time, &mut self.rng)?;
        Ok(participant.id)
    }

    /// Join with a randomly generated profile, for demos and load runs.
    pub fn join_with_generated_profile(
        &mut self,
        code: &str,
        name: &str,
    ) -> Result<ParticipantId> {
        let profile = generate_profile(name, &mut self.rng);
        self.join_room(code, profile)
    }

    pub fn start_simulation(&mut self, room_id: RoomId) -> Result<()> {
        self.registry.set_simulation_state(room_id, true)
    }

    pub fn pause_simulation(&mut self, room_id: RoomId) -> Result<()> {
        self.registry.set_simulation_state(room_id, false)
    }

    pub fn set_simulation_state(&mut self, room_id: RoomId, started: bool) -> Result<()> {
        self.registry.set_simulation_state(room_id, started)
    }

    pub fn reset_room(&mut self, room_id: RoomId) -> Result<()> {
        self.registry.reset_room(room_id)
    }

    pub fn end_room(&mut self, room_id: RoomId) -> Result<()> {
        self.registry.end_room(room_id)
    }

    /// Manual relocation; returns the number of new risk notices.
    pub fn relocate(&mut self, participant_id: ParticipantId, zone: Zone) -> Result<usize> {
        self.registry.relocate(participant_id, zone, self.sim_time)
    }

    // ── Clock and movement ─────────────────────────────────────────────

    /// Advance the clock by `delta_seconds` (scaled) and run the movement
    /// gate. Returns whether anyone moved.
    pub fn update(&mut self, delta_seconds: f64) -> bool {
        self.sim_time += delta_seconds.max(0.0) * self.time_scale;
        self.tick_movement()
    }

    /// Run the movement gate at the current time without advancing it.
    pub fn tick_movement(&mut self) -> bool {
        self.engine.tick(&mut self.registry, self.sim_time, &mut self.rng)
    }

    /// Like [`tick_movement`](Self::tick_movement) but reports the round.
    pub fn tick_movement_with_summary(&mut self) -> Option<RoundSummary> {
        self.engine
            .tick_with_summary(&mut self.registry, self.sim_time, &mut self.rng)
    }

    pub fn set_auto_movement(&mut self, enabled: bool) {
        self.engine.set_enabled(enabled);
    }

    pub fn auto_movement(&self) -> bool {
        self.engine.is_enabled()
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn movement_rounds(&self) -> u64 {
        self.engine.rounds()
    }

    // ── Sensors ────────────────────────────────────────────────────────

    /// Generate a harness sensor run using the session RNG.
    pub fn run_sensor_scenario(
        &mut self,
        scenario: SensorScenario,
        duration_secs: u32,
    ) -> SensorTrace {
        generate_trace(scenario, duration_secs, &mut self.rng)
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.registry.room(room_id)
    }

    pub fn find_room_by_code(&self, code: &str) -> Option<&Room> {
        self.registry.find_room_by_code(code)
    }

    pub fn participant(&self, participant_id: ParticipantId) -> Option<&Participant> {
        self.registry.participant(participant_id)
    }

    pub fn members(&self, room_id: RoomId) -> Vec<&Participant> {
        self.registry.members(room_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let rooms = self
            .registry
            .rooms()
            .iter()
            .map(|room| RoomSnapshot {
                id: room.id,
                code: room.code.clone(),
                facilitator: room.config.facilitator_name.clone(),
                active: room.active,
                simulation_started: room.simulation_started,
                capacity: room.config.max_participants,
                participants: self
                    .registry
                    .members(room.id)
                    .into_iter()
                    .map(ParticipantSnapshot::from)
                    .collect(),
            })
            .collect();

        SessionSnapshot {
            sim_time: self.sim_time,
            auto_movement: self.engine.is_enabled(),
            movement_rounds: self.engine.rounds(),
            rooms,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Display-layer view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub sim_time: f64,
    pub auto_movement: bool,
    pub movement_rounds: u64,
    pub rooms: Vec<RoomSnapshot>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn participant_count(&self) -> usize {
        self.rooms.iter().map(|r| r.participants.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub code: String,
    pub facilitator: String,
    pub active: bool,
    pub simulation_started: bool,
    pub capacity: usize,
    pub participants: Vec<ParticipantSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub name: String,
    pub zone: String,
    pub moves: usize,
    pub critical_risks: usize,
    pub risks: Vec<String>,
}

impl From<&Participant> for ParticipantSnapshot {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id,
            name: p.profile.name.clone(),
            zone: p.zone.name().to_string(),
            moves: p.history.len(),
            critical_risks: p.risks.critical_count(),
            risks: p.risks.messages().into_iter().map(String::from).collect(),
        }
    }
}
