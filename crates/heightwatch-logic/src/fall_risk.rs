//! Fall-risk scoring: an additive integer score bucketed into a level.
//!
//! Only the level is part of the contract. The numeric score is exposed
//! for the harness and for tests.

use serde::{Deserialize, Serialize};

use crate::constants::{CharacterType, HealthCondition, Ppe, Zone};
use crate::profile::ParticipantProfile;

/// Fall-risk level, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FallRiskLevel {
    /// Score >= 8.
    High,
    /// Score 5..8.
    Medium,
    /// Score 3..5.
    Low,
    /// Score < 3, no notice emitted.
    None,
}

impl FallRiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 8 {
            Self::High
        } else if score >= 5 {
            Self::Medium
        } else if score >= 3 {
            Self::Low
        } else {
            Self::None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::None => "NONE",
        }
    }
}

/// Additive fall-risk score for a profile in a zone.
pub fn fall_risk_score(profile: &ParticipantProfile, zone: Zone) -> u32 {
    let mut score = 0;

    if profile.has_condition(HealthCondition::Vertigo) {
        score += 2;
    }
    if profile.has_condition(HealthCondition::Dizziness) {
        score += 2;
    }
    match profile.character {
        CharacterType::OlderPerson => score += 2,
        CharacterType::PregnantWoman => score += 3,
        _ => {}
    }
    if zone.is_scaffolding() {
        score += 3;
    }
    if zone.is_structure() {
        score += 2;
    }
    if !profile.wears(Ppe::SafetyHarness) {
        score += 4;
    }

    score
}

pub fn score_fall_risk(profile: &ParticipantProfile, zone: Zone) -> FallRiskLevel {
    FallRiskLevel::from_score(fall_risk_score(profile, zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        character: CharacterType,
        conditions: Vec<HealthCondition>,
        ppe: Vec<Ppe>,
    ) -> ParticipantProfile {
        ParticipantProfile {
            name: "Test".into(),
            character,
            conditions,
            ppe,
            ..ParticipantProfile::default()
        }
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(FallRiskLevel::from_score(12), FallRiskLevel::High);
        assert_eq!(FallRiskLevel::from_score(8), FallRiskLevel::High);
        assert_eq!(FallRiskLevel::from_score(7), FallRiskLevel::Medium);
        assert_eq!(FallRiskLevel::from_score(5), FallRiskLevel::Medium);
        assert_eq!(FallRiskLevel::from_score(4), FallRiskLevel::Low);
        assert_eq!(FallRiskLevel::from_score(3), FallRiskLevel::Low);
        assert_eq!(FallRiskLevel::from_score(2), FallRiskLevel::None);
        assert_eq!(FallRiskLevel::from_score(0), FallRiskLevel::None);
    }

    #[test]
    fn test_pregnant_vertigo_scaffolding_no_ppe() {
        let p = profile(
            CharacterType::PregnantWoman,
            vec![HealthCondition::Vertigo],
            vec![],
        );
        // 3 scaffold + 3 pregnant + 2 vertigo + 4 no harness
        assert_eq!(fall_risk_score(&p, Zone::Scaffolding), 12);
        assert_eq!(score_fall_risk(&p, Zone::Scaffolding), FallRiskLevel::High);
    }

    #[test]
    fn test_harnessed_worker_on_ground_is_safe() {
        let p = profile(
            CharacterType::MuscularMan,
            vec![],
            vec![Ppe::Helmet, Ppe::SafetyHarness],
        );
        assert_eq!(fall_risk_score(&p, Zone::StagingArea), 0);
        assert_eq!(score_fall_risk(&p, Zone::StagingArea), FallRiskLevel::None);
    }

    #[test]
    fn test_structure_and_dizziness() {
        let p = profile(
            CharacterType::OlderPerson,
            vec![HealthCondition::Dizziness],
            vec![Ppe::SafetyHarness],
        );
        // 2 dizziness + 2 older + 2 structure
        assert_eq!(fall_risk_score(&p, Zone::Structure), 6);
        assert_eq!(score_fall_risk(&p, Zone::Structure), FallRiskLevel::Medium);
    }

    #[test]
    fn test_missing_harness_alone_is_low() {
        let p = profile(CharacterType::AthleticWoman, vec![], vec![]);
        assert_eq!(score_fall_risk(&p, Zone::Excavation), FallRiskLevel::Low);
    }

    #[test]
    fn test_scorer_is_pure() {
        let p = profile(
            CharacterType::PregnantWoman,
            vec![HealthCondition::Dizziness],
            vec![],
        );
        for zone in Zone::ALL {
            assert_eq!(score_fall_risk(&p, zone), score_fall_risk(&p, zone));
        }
    }
}
