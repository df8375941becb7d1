//! Fixed vocabularies: work zones, character types, health conditions,
//! tools, PPE items, and room configuration enums.
//!
//! Every enum exposes `ALL` in declaration order and a human-readable
//! `name()`. Both the session crate and the simtest harness use these.

use serde::{Deserialize, Serialize};

// ============================================================================
// WORK ZONES
// ============================================================================

/// Named work areas a participant can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Zone {
    Scaffolding = 0,
    Structure = 1,
    Excavation = 2,
    /// Ground-level entry point; where participants start.
    #[default]
    StagingArea = 3,
}

impl Zone {
    pub const ALL: [Zone; 4] = [
        Zone::Scaffolding,
        Zone::Structure,
        Zone::Excavation,
        Zone::StagingArea,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Scaffolding => "Zone A - Scaffolding",
            Self::Structure => "Zone B - Structure",
            Self::Excavation => "Zone C - Excavation",
            Self::StagingArea => "Zone D - Staging Area",
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        Self::ALL.get(val as usize).copied()
    }

    /// Work on scaffolding (elevated platform).
    pub fn is_scaffolding(self) -> bool {
        self == Self::Scaffolding
    }

    /// Work on a steel or concrete structure under construction.
    pub fn is_structure(self) -> bool {
        self == Self::Structure
    }

    /// Work inside a trench or excavation.
    pub fn is_excavation(self) -> bool {
        self == Self::Excavation
    }

    /// All zones except `self`, in declaration order.
    pub fn others(self) -> Vec<Zone> {
        Self::ALL.iter().copied().filter(|z| *z != self).collect()
    }
}

// ============================================================================
// PARTICIPANT ATTRIBUTES
// ============================================================================

/// Body archetype chosen for a participant's simulated worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterType {
    MuscularMan,
    AthleticWoman,
    OlderPerson,
    OverweightPerson,
    PregnantWoman,
    MotorDisability,
}

impl CharacterType {
    pub const ALL: [CharacterType; 6] = [
        CharacterType::MuscularMan,
        CharacterType::AthleticWoman,
        CharacterType::OlderPerson,
        CharacterType::OverweightPerson,
        CharacterType::PregnantWoman,
        CharacterType::MotorDisability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MuscularMan => "Muscular man",
            Self::AthleticWoman => "Athletic woman",
            Self::OlderPerson => "Older person",
            Self::OverweightPerson => "Overweight person",
            Self::PregnantWoman => "Pregnant woman",
            Self::MotorDisability => "Person with motor disability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthCondition {
    Vertigo,
    Dizziness,
    Cardiac,
    Diabetes,
    Hypertension,
    Asthma,
}

impl HealthCondition {
    pub const ALL: [HealthCondition; 6] = [
        HealthCondition::Vertigo,
        HealthCondition::Dizziness,
        HealthCondition::Cardiac,
        HealthCondition::Diabetes,
        HealthCondition::Hypertension,
        HealthCondition::Asthma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vertigo => "Vertigo",
            Self::Dizziness => "Dizziness",
            Self::Cardiac => "Cardiac condition",
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::Asthma => "Asthma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Hammer,
    Drill,
    PowerSaw,
    Welder,
    Compactor,
    PressureWasher,
    Grinder,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Hammer,
        Tool::Drill,
        Tool::PowerSaw,
        Tool::Welder,
        Tool::Compactor,
        Tool::PressureWasher,
        Tool::Grinder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Hammer => "Hammer",
            Self::Drill => "Drill",
            Self::PowerSaw => "Power saw",
            Self::Welder => "Welder",
            Self::Compactor => "Compactor",
            Self::PressureWasher => "Pressure washer",
            Self::Grinder => "Grinder",
        }
    }

    /// Heavy equipment that adds to the overload score per instance carried.
    pub fn is_heavy(self) -> bool {
        matches!(self, Self::Welder | Self::Compactor | Self::PressureWasher)
    }
}

/// Personal protective equipment items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ppe {
    Helmet,
    SteelToeBoots,
    SafetyHarness,
    Gloves,
    SafetyGlasses,
    HearingProtection,
    ReflectiveVest,
}

impl Ppe {
    pub const ALL: [Ppe; 7] = [
        Ppe::Helmet,
        Ppe::SteelToeBoots,
        Ppe::SafetyHarness,
        Ppe::Gloves,
        Ppe::SafetyGlasses,
        Ppe::HearingProtection,
        Ppe::ReflectiveVest,
    ];

    /// Items every participant must wear regardless of zone.
    pub const REQUIRED: [Ppe; 2] = [Ppe::Helmet, Ppe::SteelToeBoots];

    pub fn name(self) -> &'static str {
        match self {
            Self::Helmet => "Helmet",
            Self::SteelToeBoots => "Steel-toe boots",
            Self::SafetyHarness => "Safety harness",
            Self::Gloves => "Gloves",
            Self::SafetyGlasses => "Safety glasses",
            Self::HearingProtection => "Hearing protection",
            Self::ReflectiveVest => "Reflective vest",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    Novice,
    Intermediate,
    Experienced,
    Expert,
}

// ============================================================================
// ROOM CONFIGURATION
// ============================================================================

/// Scenario difficulty, ordered from easiest to hardest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Falls,
    FallingObjects,
    Collapse,
    Ergonomic,
    Health,
    Tools,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::Falls,
        RiskCategory::FallingObjects,
        RiskCategory::Collapse,
        RiskCategory::Ergonomic,
        RiskCategory::Health,
        RiskCategory::Tools,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Wind,
    Heat,
    Storm,
}
