//! HeightWatch Headless Classroom Harness
//!
//! Validates the risk rules and runs a seeded classroom session in-process.
//! No display loop, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p heightwatch-simtest
//!   cargo run -p heightwatch-simtest -- --verbose --seed 7 --ticks 400
//!   cargo run -p heightwatch-simtest -- --scenario class.json --json

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use heightwatch_core::engine::EngineConfig;
use heightwatch_core::error::SessionError;
use heightwatch_core::registry::RoomId;
use heightwatch_core::session::{SessionSnapshot, Simulation};
use heightwatch_logic::constants::{CharacterType, HealthCondition, Ppe, Tool, Zone};
use heightwatch_logic::fall_risk::{fall_risk_score, score_fall_risk, FallRiskLevel};
use heightwatch_logic::overload::{overload_score, score_overload, OverloadLevel};
use heightwatch_logic::profile::{validate_profile, ParticipantProfile};
use heightwatch_logic::risk::{assess_zone, evaluate_profile_risks, RiskCode, PROFILE_RULES};
use heightwatch_logic::room_config::{validate_room_config, RoomConfig};
use heightwatch_logic::sensors::SensorScenario;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use serde::Deserialize;

// ── Built-in classroom (same JSON a facilitator would load) ────────────
const SCENARIO_JSON: &str = include_str!("../../../data/classroom_scenario.json");

// ISO 8601 timestamp and colour-coded level
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ClassroomScenario {
    room: RoomConfig,
    participants: Vec<ParticipantProfile>,
    generated_participants: usize,
    engine: EngineConfig,
    ticks: u32,
    tick_seconds: f64,
    sensor_duration_secs: u32,
}

impl Default for ClassroomScenario {
    fn default() -> Self {
        Self {
            room: RoomConfig::default(),
            participants: Vec::new(),
            generated_participants: 0,
            engine: EngineConfig::default(),
            ticks: 120,
            tick_seconds: 5.0,
            sensor_duration_secs: 10,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "heightwatch-simtest")]
#[command(about = "Validate HeightWatch risk logic and run a seeded classroom session")]
struct Args {
    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of clock updates in the session run
    #[arg(long)]
    ticks: Option<u32>,

    /// Simulation time added per update
    #[arg(long)]
    tick_seconds: Option<f64>,

    /// Scenario JSON file to use instead of the built-in classroom
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Print the final session snapshot as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level for library output
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.into())?;

    let mut scenario = load_scenario(args.scenario.as_deref())?;
    if let Some(seed) = args.seed {
        scenario.engine.seed = Some(seed);
    }
    // Harness runs are always reproducible.
    if scenario.engine.seed.is_none() {
        scenario.engine.seed = Some(0);
    }
    if let Some(ticks) = args.ticks {
        scenario.ticks = ticks;
    }
    if let Some(tick_seconds) = args.tick_seconds {
        scenario.tick_seconds = tick_seconds;
    }

    // Keep stdout clean for the snapshot when --json is set.
    let mut out: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    writeln!(out, "=== HeightWatch Classroom Harness ===\n")?;

    let mut sections: Vec<(&str, Vec<TestResult>)> = Vec::new();

    // 1. Scenario data
    sections.push(("Scenario", validate_scenario(&scenario)));

    // 2. Profile rule table
    sections.push(("Profile Rules", validate_profile_rules()));

    // 3. Fall-risk and overload scorers
    sections.push(("Scorers", validate_scorers()));

    // 4. Room registry
    sections.push(("Registry", validate_registry()));

    // 5. Seeded classroom run
    let (session_results, snapshot) = run_classroom(&scenario);
    sections.push(("Classroom Run", session_results));

    // 6. Harness sensor traces
    sections.push(("Sensors", validate_sensors(&scenario)));

    let mut passed = 0;
    let mut failed = 0;
    for (title, results) in &sections {
        writeln!(out, "--- {title} ---")?;
        for r in results {
            if r.passed {
                passed += 1;
            } else {
                failed += 1;
            }
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || args.verbose {
                writeln!(out, "  {} {}: {}", icon, r.name, r.detail)?;
            }
        }
    }

    if let Some(snapshot) = &snapshot {
        if args.verbose {
            print_roster(&mut out, snapshot)?;
        }
        if args.json {
            println!("{}", snapshot.to_json()?);
        }
    }

    writeln!(
        out,
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        passed + failed,
        failed
    )?;

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    let encoder = Box::new(PatternEncoder::new(LOG_PATTERN));
    let stderr = ConsoleAppender::builder()
        .encoder(encoder)
        .target(Target::Stderr)
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn load_scenario(path: Option<&Path>) -> anyhow::Result<ClassroomScenario> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing scenario {}", path.display()))
        }
        None => serde_json::from_str(SCENARIO_JSON).context("parsing built-in scenario"),
    }
}

fn print_roster(out: &mut dyn Write, snapshot: &SessionSnapshot) -> io::Result<()> {
    writeln!(out, "\n--- Roster at t={:.0} ---", snapshot.sim_time)?;
    for room in &snapshot.rooms {
        writeln!(
            out,
            "  {} ({}, {})",
            room.code,
            room.facilitator,
            if room.simulation_started { "running" } else { "paused" }
        )?;
        for p in &room.participants {
            writeln!(
                out,
                "    {:<16} {:<24} moves={:<3} risks={:<3} critical={}",
                p.name,
                p.zone,
                p.moves,
                p.risks.len(),
                p.critical_risks
            )?;
        }
    }
    Ok(())
}

// ── 1. Scenario ─────────────────────────────────────────────────────────

fn validate_scenario(scenario: &ClassroomScenario) -> Vec<TestResult> {
    let mut results = Vec::new();

    let room_errors = validate_room_config(&scenario.room);
    results.push(TestResult::check(
        "scenario_room_valid",
        room_errors.is_empty(),
        if room_errors.is_empty() {
            format!("room by {}", scenario.room.facilitator_name)
        } else {
            format!("{room_errors:?}")
        },
    ));

    let invalid: Vec<String> = scenario
        .participants
        .iter()
        .filter(|p| !validate_profile(p).is_empty())
        .map(|p| format!("{:?}: {:?}", p.name, validate_profile(p)))
        .collect();
    results.push(TestResult::check(
        "scenario_profiles_valid",
        invalid.is_empty(),
        if invalid.is_empty() {
            format!("{} scripted participants", scenario.participants.len())
        } else {
            invalid.join("; ")
        },
    ));

    let seats = scenario.participants.len() + scenario.generated_participants;
    results.push(TestResult::check(
        "scenario_fits_capacity",
        seats <= scenario.room.max_participants,
        format!("{} seats of {}", seats, scenario.room.max_participants),
    ));

    results.push(TestResult::check(
        "scenario_positive_clock",
        scenario.tick_seconds > 0.0 && scenario.ticks > 0,
        format!("{} ticks of {}", scenario.ticks, scenario.tick_seconds),
    ));

    results
}

// ── 2. Profile Rules ────────────────────────────────────────────────────

fn validate_profile_rules() -> Vec<TestResult> {
    let mut results = Vec::new();

    let unique: HashSet<RiskCode> = PROFILE_RULES.iter().map(|r| r.code).collect();
    results.push(TestResult::check(
        "rules_unique_codes",
        unique.len() == PROFILE_RULES.len() && PROFILE_RULES.len() == 19,
        format!("{} rules, {} distinct codes", PROFILE_RULES.len(), unique.len()),
    ));

    // Scaffolding without a harness is always flagged, whatever else applies.
    let mut violations = 0;
    let mut checked = 0;
    for character in CharacterType::ALL {
        for condition in HealthCondition::ALL {
            for tools in [vec![], vec![Tool::Welder, Tool::Drill, Tool::Grinder, Tool::Hammer]] {
                let p = ParticipantProfile {
                    name: "sweep".into(),
                    character,
                    conditions: vec![condition],
                    tools,
                    ppe: vec![Ppe::Helmet, Ppe::SteelToeBoots],
                    ..ParticipantProfile::default()
                };
                checked += 1;
                let codes: Vec<RiskCode> = assess_zone(&p, Zone::Scaffolding)
                    .into_iter()
                    .map(|n| n.code)
                    .collect();
                if !codes.contains(&RiskCode::NoHarnessOnScaffolding) {
                    violations += 1;
                }
            }
        }
    }
    results.push(TestResult::check(
        "rules_harness_on_scaffolding",
        violations == 0,
        format!("{checked} profiles, {violations} missing the harness notice"),
    ));

    let bmi_codes = |weight_kg: f32| -> Vec<RiskCode> {
        let p = ParticipantProfile {
            name: "bmi".into(),
            height_cm: 175.0,
            weight_kg,
            ..ParticipantProfile::default()
        };
        evaluate_profile_risks(&p, Zone::StagingArea)
            .into_iter()
            .map(|n| n.code)
            .filter(|c| matches!(c, RiskCode::HighBmi | RiskCode::LowBmi))
            .collect()
    };
    let heavy = bmi_codes(105.0);
    let light = bmi_codes(45.0);
    let normal = bmi_codes(70.0);
    results.push(TestResult::check(
        "rules_bmi_bands",
        heavy == [RiskCode::HighBmi] && light == [RiskCode::LowBmi] && normal.is_empty(),
        format!("105kg {heavy:?}, 45kg {light:?}, 70kg {normal:?}"),
    ));

    let pregnant = ParticipantProfile {
        name: "zone".into(),
        character: CharacterType::PregnantWoman,
        ..ParticipantProfile::default()
    };
    let in_excavation: Vec<Zone> = Zone::ALL
        .into_iter()
        .filter(|&z| {
            evaluate_profile_risks(&pregnant, z)
                .iter()
                .any(|n| n.code == RiskCode::PregnantInExcavation)
        })
        .collect();
    results.push(TestResult::check(
        "rules_zone_specific",
        in_excavation == [Zone::Excavation],
        format!("pregnant-in-excavation fires in {in_excavation:?}"),
    ));

    results
}

// ── 3. Scorers ──────────────────────────────────────────────────────────

fn validate_scorers() -> Vec<TestResult> {
    let mut results = Vec::new();

    let laura = ParticipantProfile {
        name: "Laura".into(),
        character: CharacterType::PregnantWoman,
        conditions: vec![HealthCondition::Vertigo],
        ppe: vec![],
        ..ParticipantProfile::default()
    };
    let score = fall_risk_score(&laura, Zone::Scaffolding);
    let level = score_fall_risk(&laura, Zone::Scaffolding);
    results.push(TestResult::check(
        "fall_risk_worst_case",
        score == 12 && level == FallRiskLevel::High,
        format!("score {score} -> {}", level.name()),
    ));

    let harnessed = ParticipantProfile {
        name: "Safe".into(),
        character: CharacterType::MuscularMan,
        ppe: vec![Ppe::Helmet, Ppe::SteelToeBoots, Ppe::SafetyHarness],
        ..ParticipantProfile::default()
    };
    let ground = score_fall_risk(&harnessed, Zone::StagingArea);
    results.push(TestResult::check(
        "fall_risk_ground_level",
        ground == FallRiskLevel::None,
        format!("harnessed worker on the ground -> {}", ground.name()),
    ));

    let carlos = ParticipantProfile {
        name: "Carlos".into(),
        character: CharacterType::OverweightPerson,
        height_cm: 175.0,
        weight_kg: 105.0,
        tools: vec![Tool::Welder, Tool::Compactor, Tool::Drill, Tool::Hammer],
        ..ParticipantProfile::default()
    };
    let overload = score_overload(&carlos);
    results.push(TestResult::check(
        "overload_alert",
        overload == OverloadLevel::Alert,
        format!("score {} -> {}", overload_score(&carlos), overload.name()),
    ));

    let mut unstable = 0;
    for zone in Zone::ALL {
        for p in [&laura, &harnessed, &carlos] {
            if score_fall_risk(p, zone) != score_fall_risk(p, zone)
                || score_overload(p) != score_overload(p)
                || assess_zone(p, zone) != assess_zone(p, zone)
            {
                unstable += 1;
            }
        }
    }
    results.push(TestResult::check(
        "scorers_idempotent",
        unstable == 0,
        format!("{unstable} unstable evaluations"),
    ));

    results
}

// ── 4. Registry ─────────────────────────────────────────────────────────

fn harness_room(capacity: usize) -> RoomConfig {
    RoomConfig {
        facilitator_name: "Harness".into(),
        facilitator_contact: "harness@localhost".into(),
        organization: "HeightWatch".into(),
        max_participants: capacity,
        ..RoomConfig::default()
    }
}

fn named(name: &str) -> ParticipantProfile {
    ParticipantProfile {
        name: name.into(),
        ..ParticipantProfile::default()
    }
}

fn validate_registry() -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut sim = Simulation::new(EngineConfig {
        seed: Some(1),
        ..EngineConfig::default()
    });

    let room = match sim.create_room(harness_room(1)) {
        Ok(room) => room,
        Err(e) => {
            results.push(TestResult::check("registry_create", false, e.to_string()));
            return results;
        }
    };
    let code = sim.room(room).map(|r| r.code.clone()).unwrap_or_default();

    let first = sim.join_room(&code.to_lowercase(), named("First"));
    results.push(TestResult::check(
        "registry_case_insensitive_join",
        first.is_ok(),
        format!("{} joined as {}", code, code.to_lowercase()),
    ));

    let second = sim.join_room(&code, named("Second"));
    let members = sim.members(room).len();
    results.push(TestResult::check(
        "registry_capacity",
        matches!(second, Err(SessionError::Capacity { max: 1, .. })) && members == 1,
        format!("second join: {second:?}, {members} member(s)"),
    ));

    let missing = sim.join_room("SIM-12", named("Nobody"));
    results.push(TestResult::check(
        "registry_not_found",
        matches!(missing, Err(SessionError::NotFound(_))),
        format!("{missing:?}"),
    ));

    let invalid = sim.create_room(RoomConfig::default());
    results.push(TestResult::check(
        "registry_validation",
        invalid.as_ref().is_err_and(SessionError::is_validation)
            && sim.registry().rooms().len() == 1,
        format!("{invalid:?}"),
    ));

    let ended = sim.end_room(room).and_then(|()| sim.start_simulation(room));
    results.push(TestResult::check(
        "registry_end_is_terminal",
        matches!(ended, Err(SessionError::RoomClosed(_))),
        format!("start after end: {ended:?}"),
    ));

    results
}

// ── 5. Classroom Run ────────────────────────────────────────────────────

fn expected_rounds(config: &EngineConfig, ticks: u32, tick_seconds: f64) -> u64 {
    if !config.enabled {
        return 0;
    }
    let (mut now, mut last, mut rounds) = (0.0, 0.0, 0);
    for _ in 0..ticks {
        now += tick_seconds;
        if now - last >= config.interval {
            last = now;
            rounds += 1;
        }
    }
    rounds
}

fn populate(
    sim: &mut Simulation,
    room: RoomId,
    scenario: &ClassroomScenario,
) -> Result<usize, SessionError> {
    let code = sim.room(room).map(|r| r.code.clone()).unwrap_or_default();
    for profile in &scenario.participants {
        sim.join_room(&code, profile.clone())?;
    }
    for i in 0..scenario.generated_participants {
        sim.join_with_generated_profile(&code, &format!("Trainee {}", i + 1))?;
    }
    Ok(sim.members(room).len())
}

fn run_classroom(scenario: &ClassroomScenario) -> (Vec<TestResult>, Option<SessionSnapshot>) {
    let mut results = Vec::new();
    let mut sim = Simulation::new(scenario.engine.clone());

    // Two identical rooms: one runs, one stays paused as a control.
    let rooms = sim.create_room(scenario.room.clone()).and_then(|running| {
        let paused = sim.create_room(scenario.room.clone())?;
        Ok((running, paused))
    });
    let (running, paused) = match rooms {
        Ok(rooms) => rooms,
        Err(e) => {
            results.push(TestResult::check("run_create_rooms", false, e.to_string()));
            return (results, None);
        }
    };

    for room in [running, paused] {
        if let Err(e) = populate(&mut sim, room, scenario) {
            results.push(TestResult::check("run_join", false, e.to_string()));
            return (results, None);
        }
    }
    if let Err(e) = sim.start_simulation(running) {
        results.push(TestResult::check("run_start", false, e.to_string()));
        return (results, None);
    }

    let mut shrank = 0;
    let mut risk_counts: Vec<usize> = sim.members(running).iter().map(|p| p.risks.len()).collect();
    for _ in 0..scenario.ticks {
        sim.update(scenario.tick_seconds);
        let current: Vec<usize> = sim.members(running).iter().map(|p| p.risks.len()).collect();
        shrank += risk_counts
            .iter()
            .zip(&current)
            .filter(|(before, after)| after < before)
            .count();
        risk_counts = current;
    }

    let expected = expected_rounds(&scenario.engine, scenario.ticks, scenario.tick_seconds);
    results.push(TestResult::check(
        "run_gate_rounds",
        sim.movement_rounds() == expected,
        format!(
            "{} rounds in {:.0} time units (expected {expected})",
            sim.movement_rounds(),
            sim.sim_time()
        ),
    ));

    let members = sim.members(running);
    let moves: usize = members.iter().map(|p| p.history.len()).sum();
    let same_zone_moves = members
        .iter()
        .flat_map(|p| &p.history)
        .filter(|m| m.from == m.to)
        .count();
    results.push(TestResult::check(
        "run_moves_change_zone",
        same_zone_moves == 0,
        format!("{moves} moves, {same_zone_moves} to the same zone"),
    ));

    let slots = members.len() as u64 * sim.movement_rounds();
    let rate = if slots == 0 { 0.0 } else { moves as f64 / slots as f64 };
    results.push(TestResult::check(
        "run_move_rate",
        slots < 200 || (rate - scenario.engine.move_probability).abs() < 0.1,
        format!(
            "{:.2} observed vs {:.2} configured over {slots} draws",
            rate, scenario.engine.move_probability
        ),
    ));

    results.push(TestResult::check(
        "run_risks_monotonic",
        shrank == 0,
        format!("{shrank} shrinking risk logs across {} ticks", scenario.ticks),
    ));

    let duplicated = members
        .iter()
        .filter(|p| {
            let unique: HashSet<RiskCode> = p.risks.codes().into_iter().collect();
            unique.len() != p.risks.len()
        })
        .count();
    results.push(TestResult::check(
        "run_risks_deduplicated",
        duplicated == 0,
        format!("{duplicated} participants with repeated notices"),
    ));

    let idle_moves: usize = sim.members(paused).iter().map(|p| p.history.len()).sum();
    results.push(TestResult::check(
        "run_paused_room_still",
        idle_moves == 0,
        format!("{idle_moves} moves in the paused room"),
    ));

    let snapshot = sim.snapshot();

    let reset = sim.reset_room(running);
    let clean = sim
        .members(running)
        .iter()
        .all(|p| p.risks.is_empty() && p.history.is_empty() && p.zone == p.profile.initial_zone);
    results.push(TestResult::check(
        "run_reset",
        reset.is_ok() && clean,
        format!("{reset:?}, members back at their initial zones: {clean}"),
    ));

    (results, Some(snapshot))
}

// ── 6. Sensors ──────────────────────────────────────────────────────────

fn validate_sensors(scenario: &ClassroomScenario) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut sim = Simulation::new(scenario.engine.clone());

    for kind in SensorScenario::ALL {
        let trace = sim.run_sensor_scenario(kind, scenario.sensor_duration_secs);
        let half = trace.duration_secs as f32 / 2.0;
        let (passed, detail) = match kind {
            SensorScenario::NormalWork => (
                trace.incidents == 0,
                format!("{} samples, {} incidents", trace.samples.len(), trace.incidents),
            ),
            _ => {
                let first = trace.first_incident_at();
                let phases_match = trace
                    .samples
                    .iter()
                    .all(|s| s.hazard_phase == (s.t >= half));
                let closing = trace
                    .samples
                    .last()
                    .map(|s| trace.explanation(s))
                    .unwrap_or_default();
                (
                    trace.incidents > 0 && first.is_some_and(|t| t >= half) && phases_match,
                    format!(
                        "{} incidents, first at {:?}s, peak {:.1} m/s², max {:.0}°; {}",
                        trace.incidents,
                        first,
                        trace.peak_acceleration(),
                        trace.max_angle(),
                        closing
                    ),
                )
            }
        };
        results.push(TestResult {
            name: format!("sensors_{kind:?}").to_lowercase(),
            passed,
            detail,
        });
    }

    results
}
