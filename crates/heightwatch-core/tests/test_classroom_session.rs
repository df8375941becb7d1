//! Integration tests for a full classroom session.
//!
//! Exercises: room creation → joins → start/pause → automatic movement
//! → manual relocation → reset → end, through the `Simulation` facade.

use std::collections::HashSet;

use heightwatch_core::prelude::*;
use heightwatch_logic::constants::{CharacterType, HealthCondition, Ppe};
use heightwatch_logic::risk::RiskCode;

// ── Helpers ────────────────────────────────────────────────────────────

fn session(seed: u64) -> Simulation {
    Simulation::new(EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    })
}

fn room_config(capacity: usize) -> RoomConfig {
    RoomConfig {
        facilitator_name: "Ana Ruiz".into(),
        facilitator_contact: "ana@example.org".into(),
        organization: "Site Safety Institute".into(),
        max_participants: capacity,
        ..RoomConfig::default()
    }
}

fn open_room(sim: &mut Simulation, capacity: usize) -> (RoomId, String) {
    let id = sim.create_room(room_config(capacity)).unwrap();
    let code = sim.room(id).unwrap().code.clone();
    (id, code)
}

fn trainee(name: &str) -> ParticipantProfile {
    ParticipantProfile {
        name: name.into(),
        ..ParticipantProfile::default()
    }
}

// ── Registry ───────────────────────────────────────────────────────────

#[test]
fn capacity_one_room_rejects_second_join() {
    let mut sim = session(1);
    let (room, code) = open_room(&mut sim, 1);

    sim.join_room(&code, trainee("First")).unwrap();
    let err = sim.join_room(&code, trainee("Second")).unwrap_err();
    assert!(matches!(err, SessionError::Capacity { max: 1, .. }));
    assert_eq!(sim.members(room).len(), 1);
}

#[test]
fn lowercase_code_finds_room() {
    let mut sim = session(2);
    let (room, code) = open_room(&mut sim, 5);

    let lower = code.to_lowercase();
    assert_eq!(sim.find_room_by_code(&lower).map(|r| r.id), Some(room));
    sim.join_room(&format!("  {lower} "), trainee("Spacey")).unwrap();
    assert_eq!(sim.members(room).len(), 1);
}

#[test]
fn validation_failures_mutate_nothing() {
    let mut sim = session(3);
    let err = sim.create_room(RoomConfig::default()).unwrap_err();
    assert!(err.is_validation());
    assert!(sim.registry().rooms().is_empty());

    let (room, code) = open_room(&mut sim, 5);
    let err = sim.join_room(&code, trainee("")).unwrap_err();
    assert!(err.is_validation());
    assert!(sim.members(room).is_empty());
}

#[test]
fn ended_room_refuses_joins_and_start() {
    let mut sim = session(4);
    let (room, code) = open_room(&mut sim, 5);
    sim.join_room(&code, trainee("Early")).unwrap();
    sim.end_room(room).unwrap();

    assert!(matches!(
        sim.join_room(&code, trainee("Late")),
        Err(SessionError::RoomClosed(_))
    ));
    assert!(sim.start_simulation(room).is_err());
    // Members are kept for review.
    assert_eq!(sim.members(room).len(), 1);
}

// ── Movement ───────────────────────────────────────────────────────────

#[test]
fn paused_room_never_moves() {
    let mut sim = session(5);
    let (room, code) = open_room(&mut sim, 10);
    for i in 0..10 {
        sim.join_with_generated_profile(&code, &format!("T{i}")).unwrap();
    }

    for _ in 0..100 {
        sim.update(20.0);
    }
    assert!(sim.members(room).iter().all(|p| p.history.is_empty()));
    assert!(sim.movement_rounds() > 0);
}

#[test]
fn only_started_rooms_move() {
    let mut sim = session(6);
    let (running, code_a) = open_room(&mut sim, 8);
    let (idle, code_b) = open_room(&mut sim, 8);
    for i in 0..8 {
        sim.join_with_generated_profile(&code_a, &format!("A{i}")).unwrap();
        sim.join_with_generated_profile(&code_b, &format!("B{i}")).unwrap();
    }
    sim.start_simulation(running).unwrap();

    for _ in 0..20 {
        sim.update(20.0);
    }
    let moved: usize = sim.members(running).iter().map(|p| p.history.len()).sum();
    assert!(moved > 0);
    assert!(sim.members(idle).iter().all(|p| p.history.is_empty()));
}

#[test]
fn moves_always_change_zone_and_respect_the_gate() {
    let mut sim = session(7);
    let (room, code) = open_room(&mut sim, 12);
    for i in 0..12 {
        sim.join_with_generated_profile(&code, &format!("T{i}")).unwrap();
    }
    sim.start_simulation(room).unwrap();

    // Ten-unit steps: only every second update passes the gate.
    for _ in 0..40 {
        sim.update(10.0);
    }
    assert_eq!(sim.movement_rounds(), 20);

    for p in sim.members(room) {
        for record in &p.history {
            assert_ne!(record.from, record.to);
            assert_eq!(record.at % 20.0, 0.0);
        }
    }
}

#[test]
fn movement_rate_is_near_configured_probability() {
    let mut sim = session(8);
    let (room, code) = open_room(&mut sim, 20);
    for i in 0..20 {
        sim.join_with_generated_profile(&code, &format!("T{i}")).unwrap();
    }
    sim.start_simulation(room).unwrap();

    let rounds = 100;
    for _ in 0..rounds {
        sim.update(20.0);
    }
    let moves: usize = sim.members(room).iter().map(|p| p.history.len()).sum();
    let rate = moves as f64 / (20 * rounds) as f64;
    assert!((0.30..0.40).contains(&rate), "rate {rate}");
}

#[test]
fn risks_accumulate_monotonically_until_reset() {
    let mut sim = session(9);
    let (room, code) = open_room(&mut sim, 6);
    for i in 0..6 {
        sim.join_with_generated_profile(&code, &format!("T{i}")).unwrap();
    }
    sim.start_simulation(room).unwrap();

    let mut previous: Vec<usize> = sim.members(room).iter().map(|p| p.risks.len()).collect();
    for _ in 0..50 {
        sim.update(20.0);
        let current: Vec<usize> = sim.members(room).iter().map(|p| p.risks.len()).collect();
        for (before, after) in previous.iter().zip(&current) {
            assert!(after >= before);
        }
        previous = current;
    }

    for p in sim.members(room) {
        let unique: HashSet<RiskCode> = p.risks.codes().into_iter().collect();
        assert_eq!(unique.len(), p.risks.len());
    }

    sim.reset_room(room).unwrap();
    for p in sim.members(room) {
        assert!(p.risks.is_empty());
        assert!(p.history.is_empty());
        assert_eq!(p.zone, p.profile.initial_zone);
    }
}

// ── Manual relocation ──────────────────────────────────────────────────

#[test]
fn relocating_pregnant_trainee_to_scaffolding() {
    let mut sim = session(10);
    let (_, code) = open_room(&mut sim, 5);
    let id = sim
        .join_room(
            &code,
            ParticipantProfile {
                name: "Laura".into(),
                character: CharacterType::PregnantWoman,
                conditions: vec![HealthCondition::Vertigo],
                ppe: vec![],
                ..ParticipantProfile::default()
            },
        )
        .unwrap();

    let added = sim.relocate(id, Zone::Scaffolding).unwrap();
    assert!(added > 0);

    let p = sim.participant(id).unwrap();
    for code in [
        RiskCode::VertigoOnScaffolding,
        RiskCode::PregnantWorker,
        RiskCode::MissingRequiredPpe,
        RiskCode::NoHarnessOnScaffolding,
    ] {
        assert!(p.risks.contains(code), "missing {code:?}");
    }
    assert!(p.risks.contains(RiskCode::FallRisk(
        heightwatch_logic::fall_risk::FallRiskLevel::High
    )));
}

#[test]
fn harnessed_trainee_has_no_harness_notice() {
    let mut sim = session(11);
    let (_, code) = open_room(&mut sim, 5);
    let id = sim
        .join_room(
            &code,
            ParticipantProfile {
                name: "Safe".into(),
                ppe: vec![Ppe::Helmet, Ppe::SteelToeBoots, Ppe::SafetyHarness],
                ..ParticipantProfile::default()
            },
        )
        .unwrap();
    sim.relocate(id, Zone::Scaffolding).unwrap();
    let p = sim.participant(id).unwrap();
    assert!(!p.risks.contains(RiskCode::NoHarnessOnScaffolding));
    assert!(!p.risks.contains(RiskCode::MissingRequiredPpe));
}

#[test]
fn unknown_ids_are_reported() {
    let mut sim = session(12);
    let ghost = uuid::Uuid::nil();
    assert_eq!(
        sim.relocate(ghost, Zone::Structure),
        Err(SessionError::UnknownParticipant(ghost))
    );
    assert_eq!(sim.reset_room(ghost), Err(SessionError::UnknownRoom(ghost)));
}
