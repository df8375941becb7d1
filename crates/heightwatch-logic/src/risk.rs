//! Profile risk evaluation against a fixed, ordered rule table.
//!
//! Each rule pairs a stable [`RiskCode`] with a predicate over the profile
//! and the zone being evaluated. Rules are independent; table order only
//! decides the order notices are emitted in. Accumulated notices live in a
//! [`RiskLog`], which deduplicates by code rather than by rendered text.
//!
//! ```
//! use heightwatch_logic::constants::{Ppe, Zone};
//! use heightwatch_logic::profile::ParticipantProfile;
//! use heightwatch_logic::risk::{evaluate_profile_risks, RiskCode};
//!
//! let profile = ParticipantProfile {
//!     name: "Ana".into(),
//!     ppe: vec![Ppe::Helmet, Ppe::SteelToeBoots],
//!     ..ParticipantProfile::default()
//! };
//! let notices = evaluate_profile_risks(&profile, Zone::Scaffolding);
//! assert!(notices.iter().any(|n| n.code == RiskCode::NoHarnessOnScaffolding));
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{CharacterType, HealthCondition, Ppe, Tool, Zone};
use crate::fall_risk::{score_fall_risk, FallRiskLevel};
use crate::overload::{score_overload, OverloadLevel};
use crate::profile::{ParticipantProfile, BMI_HIGH, BMI_LOW};

/// Stable identifier for a detected hazard. Dedup key for [`RiskLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCode {
    VertigoOnScaffolding,
    DizzinessOnStructure,
    CardiacCondition,
    Diabetes,
    OlderWorker,
    PregnantWorker,
    PregnantInExcavation,
    MotorDisability,
    Overweight,
    HighBmi,
    LowBmi,
    WelderOnScaffolding,
    DrillOnStructure,
    PowerSaw,
    MissingRequiredPpe,
    NoHarnessOnScaffolding,
    ExcavationCollapse,
    FallingObjects,
    ToolOverload,
    FallRisk(FallRiskLevel),
    Overload(OverloadLevel),
}

impl RiskCode {
    /// Fixed wording for the notice. `MissingRequiredPpe` is rendered with
    /// the missing items by [`render_notice`]; this is its generic text.
    pub fn message(self) -> &'static str {
        match self {
            Self::VertigoOnScaffolding => {
                "Vertigo while working on scaffolding: risk of losing balance at height"
            }
            Self::DizzinessOnStructure => {
                "Dizziness on the structure: risk of falling from the structure"
            }
            Self::CardiacCondition => {
                "Cardiac condition: exertion at height may trigger a cardiac event"
            }
            Self::Diabetes => "Diabetes: risk of hypoglycaemia during prolonged work",
            Self::OlderWorker => "Older worker: reduced reaction time and balance",
            Self::PregnantWorker => "Pregnant worker: work at height is not recommended",
            Self::PregnantInExcavation => {
                "Pregnant worker in excavation: confined space and soil collapse exposure"
            }
            Self::MotorDisability => {
                "Motor disability: restricted mobility for climbing and evacuation"
            }
            Self::Overweight => "Overweight: additional load on harness and anchorage points",
            Self::HighBmi => "Elevated BMI (over 30): harness fit and suspension trauma risk",
            Self::LowBmi => "Low weight (BMI under 18.5): fatigue risk",
            Self::WelderOnScaffolding => "Welder on scaffolding: fire and burn risk at height",
            Self::DrillOnStructure => "Drill on the structure: vibration and loss of grip",
            Self::PowerSaw => "Power saw: cutting and laceration risk",
            Self::MissingRequiredPpe => "Missing required PPE",
            Self::NoHarnessOnScaffolding => "CRITICAL: on scaffolding without a safety harness",
            Self::ExcavationCollapse => "Excavation: collapse and entrapment risk",
            Self::FallingObjects => "Structure: falling-object risk",
            Self::ToolOverload => "More than 3 tools carried: ergonomic overload",
            Self::FallRisk(FallRiskLevel::High) => "Fall risk: HIGH",
            Self::FallRisk(FallRiskLevel::Medium) => "Fall risk: MEDIUM",
            Self::FallRisk(FallRiskLevel::Low) => "Fall risk: LOW",
            Self::FallRisk(FallRiskLevel::None) => "Fall risk: NONE",
            Self::Overload(OverloadLevel::Alert) => "Physical overload: ALERT",
            Self::Overload(OverloadLevel::Warning) => "Physical overload: WARNING",
            Self::Overload(OverloadLevel::None) => "Physical overload: NONE",
        }
    }

    /// Hazards that demand immediate facilitator attention.
    pub fn is_critical(self) -> bool {
        matches!(
            self,
            Self::NoHarnessOnScaffolding
                | Self::FallRisk(FallRiskLevel::High)
                | Self::Overload(OverloadLevel::Alert)
        )
    }
}

/// A rendered risk notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskNotice {
    pub code: RiskCode,
    pub message: String,
}

/// Render the notice text for `code` against a profile.
pub fn render_notice(code: RiskCode, profile: &ParticipantProfile) -> RiskNotice {
    let message = match code {
        RiskCode::MissingRequiredPpe => {
            let missing: Vec<&str> = profile
                .missing_required_ppe()
                .into_iter()
                .map(Ppe::name)
                .collect();
            format!("{}: {}", code.message(), missing.join(", "))
        }
        _ => code.message().to_string(),
    };
    RiskNotice { code, message }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// One row of the profile rule table.
pub struct ProfileRule {
    pub code: RiskCode,
    pub applies: fn(&ParticipantProfile, Zone) -> bool,
}

/// Profile rules in evaluation order.
pub static PROFILE_RULES: &[ProfileRule] = &[
    ProfileRule {
        code: RiskCode::VertigoOnScaffolding,
        applies: |p, z| p.has_condition(HealthCondition::Vertigo) && z.is_scaffolding(),
    },
    ProfileRule {
        code: RiskCode::DizzinessOnStructure,
        applies: |p, z| p.has_condition(HealthCondition::Dizziness) && z.is_structure(),
    },
    ProfileRule {
        code: RiskCode::CardiacCondition,
        applies: |p, _| p.has_condition(HealthCondition::Cardiac),
    },
    ProfileRule {
        code: RiskCode::Diabetes,
        applies: |p, _| p.has_condition(HealthCondition::Diabetes),
    },
    ProfileRule {
        code: RiskCode::OlderWorker,
        applies: |p, _| p.character == CharacterType::OlderPerson,
    },
    ProfileRule {
        code: RiskCode::PregnantWorker,
        applies: |p, _| p.character == CharacterType::PregnantWoman,
    },
    ProfileRule {
        code: RiskCode::PregnantInExcavation,
        applies: |p, z| p.character == CharacterType::PregnantWoman && z.is_excavation(),
    },
    ProfileRule {
        code: RiskCode::MotorDisability,
        applies: |p, _| p.character == CharacterType::MotorDisability,
    },
    ProfileRule {
        code: RiskCode::Overweight,
        applies: |p, _| p.character == CharacterType::OverweightPerson,
    },
    // The two BMI checks stay independent rather than an if/else pair.
    ProfileRule {
        code: RiskCode::HighBmi,
        applies: |p, _| p.body_mass_index() > BMI_HIGH,
    },
    ProfileRule {
        code: RiskCode::LowBmi,
        applies: |p, _| p.body_mass_index() < BMI_LOW,
    },
    ProfileRule {
        code: RiskCode::WelderOnScaffolding,
        applies: |p, z| p.carries(Tool::Welder) && z.is_scaffolding(),
    },
    ProfileRule {
        code: RiskCode::DrillOnStructure,
        applies: |p, z| p.carries(Tool::Drill) && z.is_structure(),
    },
    ProfileRule {
        code: RiskCode::PowerSaw,
        applies: |p, _| p.carries(Tool::PowerSaw),
    },
    ProfileRule {
        code: RiskCode::MissingRequiredPpe,
        applies: |p, _| !p.missing_required_ppe().is_empty(),
    },
    ProfileRule {
        code: RiskCode::NoHarnessOnScaffolding,
        applies: |p, z| z.is_scaffolding() && !p.wears(Ppe::SafetyHarness),
    },
    ProfileRule {
        code: RiskCode::ExcavationCollapse,
        applies: |_, z| z.is_excavation(),
    },
    ProfileRule {
        code: RiskCode::FallingObjects,
        applies: |_, z| z.is_structure(),
    },
    ProfileRule {
        code: RiskCode::ToolOverload,
        applies: |p, _| p.tools.len() > 3,
    },
];

/// Run the profile rule table. Pure; output order follows the table.
pub fn evaluate_profile_risks(profile: &ParticipantProfile, zone: Zone) -> Vec<RiskNotice> {
    PROFILE_RULES
        .iter()
        .filter(|rule| (rule.applies)(profile, zone))
        .map(|rule| render_notice(rule.code, profile))
        .collect()
}

/// Everything evaluated after a move: profile rules, then fall risk, then
/// overload. `NONE` levels produce no notice.
pub fn assess_zone(profile: &ParticipantProfile, zone: Zone) -> Vec<RiskNotice> {
    let mut notices = evaluate_profile_risks(profile, zone);

    let fall = score_fall_risk(profile, zone);
    if fall != FallRiskLevel::None {
        notices.push(render_notice(RiskCode::FallRisk(fall), profile));
    }

    let overload = score_overload(profile);
    if overload != OverloadLevel::None {
        notices.push(render_notice(RiskCode::Overload(overload), profile));
    }

    notices
}

// ============================================================================
// RISK LOG
// ============================================================================

/// Accumulated notices for one participant. Insertion-ordered; a code is
/// stored at most once. Only [`RiskLog::clear`] ever removes entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLog {
    notices: Vec<RiskNotice>,
}

impl RiskLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: RiskCode) -> bool {
        self.notices.iter().any(|n| n.code == code)
    }

    /// Union `incoming` into the log. Returns how many notices were new.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = RiskNotice>) -> usize {
        let before = self.notices.len();
        for notice in incoming {
            if !self.contains(notice.code) {
                self.notices.push(notice);
            }
        }
        self.notices.len() - before
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RiskNotice> {
        self.notices.iter()
    }

    pub fn codes(&self) -> Vec<RiskCode> {
        self.notices.iter().map(|n| n.code).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn critical_count(&self) -> usize {
        self.notices.iter().filter(|n| n.code.is_critical()).count()
    }
}
