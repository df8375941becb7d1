//! Participant profile: the static attributes a participant joins with.
//!
//! The profile is everything the evaluators need apart from the zone:
//! body archetype and metrics, health conditions, carried tools, and worn
//! PPE. Validation mirrors the join form: a name and plausible body
//! metrics are required.

use serde::{Deserialize, Serialize};

use crate::constants::{CharacterType, ExperienceLevel, HealthCondition, Ppe, Tool, Zone};

/// BMI above which the elevated-BMI notice fires.
pub const BMI_HIGH: f32 = 30.0;

/// BMI below which the low-weight notice fires.
pub const BMI_LOW: f32 = 18.5;

/// Static attributes of a joining participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantProfile {
    pub name: String,
    pub age: u32,
    pub experience: ExperienceLevel,
    pub institution: String,
    pub contact: String,
    pub character: CharacterType,
    pub height_cm: f32,
    pub weight_kg: f32,
    pub conditions: Vec<HealthCondition>,
    /// Carried tools. Duplicates are meaningful: two welders weigh twice as much.
    pub tools: Vec<Tool>,
    pub ppe: Vec<Ppe>,
    /// Zone the participant starts in and returns to on room reset.
    pub initial_zone: Zone,
}

impl Default for ParticipantProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 30,
            experience: ExperienceLevel::default(),
            institution: String::new(),
            contact: String::new(),
            character: CharacterType::AthleticWoman,
            height_cm: 170.0,
            weight_kg: 70.0,
            conditions: Vec::new(),
            tools: Vec::new(),
            ppe: vec![Ppe::Helmet, Ppe::SteelToeBoots, Ppe::SafetyHarness],
            initial_zone: Zone::default(),
        }
    }
}

impl ParticipantProfile {
    pub fn has_condition(&self, condition: HealthCondition) -> bool {
        self.conditions.contains(&condition)
    }

    pub fn carries(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }

    pub fn wears(&self, item: Ppe) -> bool {
        self.ppe.contains(&item)
    }

    /// Required PPE items not worn, in `Ppe::REQUIRED` order.
    pub fn missing_required_ppe(&self) -> Vec<Ppe> {
        Ppe::REQUIRED
            .iter()
            .copied()
            .filter(|item| !self.wears(*item))
            .collect()
    }

    pub fn body_mass_index(&self) -> f32 {
        body_mass_index(self.weight_kg, self.height_cm)
    }
}

/// Body-mass index from weight in kilograms and height in centimetres.
pub fn body_mass_index(weight_kg: f32, height_cm: f32) -> f32 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Problems found when validating a participant profile.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("participant name is required")]
    EmptyName,
    #[error("height must be between 50 and 250 cm, got {0}")]
    InvalidHeight(f32),
    #[error("weight must be between 20 and 300 kg, got {0}")]
    InvalidWeight(f32),
}

/// Validate a profile before joining. Returns every problem found.
pub fn validate_profile(profile: &ParticipantProfile) -> Vec<ProfileError> {
    let mut errors = Vec::new();

    if profile.name.trim().is_empty() {
        errors.push(ProfileError::EmptyName);
    }
    if !(50.0..=250.0).contains(&profile.height_cm) {
        errors.push(ProfileError::InvalidHeight(profile.height_cm));
    }
    if !(20.0..=300.0).contains(&profile.weight_kg) {
        errors.push(ProfileError::InvalidWeight(profile.weight_kg));
    }

    errors
}
