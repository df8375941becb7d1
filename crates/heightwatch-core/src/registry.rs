//! Room and participant registry.
//!
//! Rooms are kept in creation order and participants in a map keyed by
//! id. A participant references its room by id only; a room lists member
//! ids in join order. Capacity and the `active` flag are enforced at
//! join time.

use std::collections::HashMap;

use heightwatch_logic::constants::Zone;
use heightwatch_logic::profile::{validate_profile, ParticipantProfile};
use heightwatch_logic::risk::{assess_zone, evaluate_profile_risks, RiskLog};
use heightwatch_logic::room_config::{normalize_join_code, validate_room_config, RoomConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::generation::{generate_id, generate_join_code};

pub type RoomId = Uuid;
pub type ParticipantId = Uuid;

/// One relocation in a participant's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Zone,
    pub to: Zone,
    /// Simulation time of the move.
    pub at: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub room_id: RoomId,
    pub profile: ParticipantProfile,
    pub zone: Zone,
    pub joined_at: f64,
    pub last_move_at: Option<f64>,
    pub history: Vec<MoveRecord>,
    pub risks: RiskLog,
}

impl Participant {
    /// Move to `to` at time `now`, then re-run every evaluator against the
    /// new zone. Returns the number of new risk notices.
    pub fn relocate_to(&mut self, to: Zone, now: f64) -> usize {
        self.history.push(MoveRecord {
            from: self.zone,
            to,
            at: now,
        });
        self.zone = to;
        self.last_move_at = Some(now);

        // Evaluators must see the updated zone.
        self.risks.merge(assess_zone(&self.profile, self.zone))
    }

    /// Back to the initial zone with no history and no accumulated risks.
    fn reset(&mut self) {
        self.zone = self.profile.initial_zone;
        self.last_move_at = None;
        self.history.clear();
        self.risks.clear();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub code: String,
    pub config: RoomConfig,
    /// Member ids in join order.
    pub members: Vec<ParticipantId>,
    /// False once the room has ended. Never set back to true.
    pub active: bool,
    /// Whether automatic movement runs for this room.
    pub simulation_started: bool,
    pub created_at: f64,
}

impl Room {
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.config.max_participants
    }

    /// Seats left before the room reaches capacity.
    pub fn remaining_capacity(&self) -> usize {
        self.config.max_participants.saturating_sub(self.members.len())
    }
}

/// All rooms and participants of one serving process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    pub(crate) rooms: Vec<Room>,
    pub(crate) participants: HashMap<ParticipantId, Participant>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room from a validated configuration.
    pub fn create_room(
        &mut self,
        config: RoomConfig,
        now: f64,
        rng: &mut impl Rng,
    ) -> Result<&Room> {
        let errors = validate_room_config(&config);
        if !errors.is_empty() {
            return Err(SessionError::InvalidRoom(errors));
        }

        let room = Room {
            id: generate_id(rng),
            code: generate_join_code(rng),
            config,
            members: Vec::new(),
            active: true,
            simulation_started: false,
            created_at: now,
        };
        log::info!(
            "Room {} created by {} ({} seats)",
            room.code,
            room.config.facilitator_name,
            room.config.max_participants
        );
        self.rooms.push(room);
        Ok(&self.rooms[self.rooms.len() - 1])
    }

    /// Join the room matching `code` (case-insensitive).
    ///
    /// The new participant starts in its profile's initial zone and its
    /// risk log is seeded with the profile rules for that zone.
    pub fn join_room(
        &mut self,
        code: &str,
        profile: ParticipantProfile,
        now: f64,
        rng: &mut impl Rng,
    ) -> Result<&Participant> {
        let room_index = self
            .find_room_index_by_code(code)
            .ok_or_else(|| SessionError::NotFound(code.to_string()))?;

        let room = &self.rooms[room_index];
        if !room.active {
            return Err(SessionError::RoomClosed(room.code.clone()));
        }
        if room.is_full() {
            return Err(SessionError::Capacity {
                code: room.code.clone(),
                max: room.config.max_participants,
            });
        }

        let errors = validate_profile(&profile);
        if !errors.is_empty() {
            return Err(SessionError::InvalidProfile(errors));
        }

        let zone = profile.initial_zone;
        let mut risks = RiskLog::new();
        risks.merge(evaluate_profile_risks(&profile, zone));

        let id = generate_id(rng);
        let participant = Participant {
            id,
            room_id: room.id,
            profile,
            zone,
            joined_at: now,
            last_move_at: None,
            history: Vec::new(),
            risks,
        };
        log::info!(
            "{} joined room {} ({} initial risks)",
            participant.profile.name,
            room.code,
            participant.risks.len()
        );

        self.rooms[room_index].members.push(id);
        let stored = self.participants.entry(id).or_insert(participant);
        Ok(&*stored)
    }

    /// Start or pause automatic movement for a room.
    pub fn set_simulation_state(&mut self, room_id: RoomId, started: bool) -> Result<()> {
        let room = self.room_mut(room_id)?;
        if started && !room.active {
            return Err(SessionError::RoomClosed(room.code.clone()));
        }
        room.simulation_started = started;
        log::info!(
            "Room {} simulation {}",
            room.code,
            if started { "started" } else { "paused" }
        );
        Ok(())
    }

    /// Return every member to its initial zone and clear accumulated risks.
    pub fn reset_room(&mut self, room_id: RoomId) -> Result<()> {
        let room = self
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .ok_or(SessionError::UnknownRoom(room_id))?;

        for member in &room.members {
            if let Some(p) = self.participants.get_mut(member) {
                p.reset();
            }
        }
        log::info!("Room {} reset ({} members)", room.code, room.members.len());
        Ok(())
    }

    /// Close the room for good. Members are kept for review.
    pub fn end_room(&mut self, room_id: RoomId) -> Result<()> {
        let room = self.room_mut(room_id)?;
        room.active = false;
        room.simulation_started = false;
        log::info!("Room {} ended", room.code);
        Ok(())
    }

    /// Manual relocation. Skips the movement probability but still runs
    /// every evaluator. Moving to the current zone records a move as well.
    pub fn relocate(
        &mut self,
        participant_id: ParticipantId,
        zone: Zone,
        now: f64,
    ) -> Result<usize> {
        let participant = self
            .participants
            .get_mut(&participant_id)
            .ok_or(SessionError::UnknownParticipant(participant_id))?;
        let added = participant.relocate_to(zone, now);
        log::debug!(
            "{} relocated to {} ({} new risks)",
            participant.profile.name,
            zone.name(),
            added
        );
        Ok(added)
    }

    // ── Lookups ─────────────────────────────────────────────────────────

    /// Codes are not unique. An active room wins over an ended one, then
    /// creation order decides.
    fn find_room_index_by_code(&self, code: &str) -> Option<usize> {
        let code = normalize_join_code(code)?;
        self.rooms
            .iter()
            .position(|r| r.active && r.code == code)
            .or_else(|| self.rooms.iter().position(|r| r.code == code))
    }

    /// Room matching a user-typed join code. Malformed codes match nothing.
    pub fn find_room_by_code(&self, code: &str) -> Option<&Room> {
        self.find_room_index_by_code(code).map(|i| &self.rooms[i])
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    fn room_mut(&mut self, room_id: RoomId) -> Result<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|r| r.id == room_id)
            .ok_or(SessionError::UnknownRoom(room_id))
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn participant(&self, participant_id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&participant_id)
    }

    /// Members of a room in join order. Dangling ids are skipped.
    pub fn members(&self, room_id: RoomId) -> Vec<&Participant> {
        self.room(room_id)
            .map(|room| {
                room.members
                    .iter()
                    .filter_map(|id| self.participants.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
