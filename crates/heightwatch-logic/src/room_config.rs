//! Facilitator-side room configuration and join-code handling.
//!
//! A room is configured once at creation. Join codes take the form
//! `SIM-NNNN` with `NNNN` in `1000..=9999`; lookups upper-case the input
//! first so codes are matched case-insensitively.

use serde::{Deserialize, Serialize};

use crate::constants::{Difficulty, RiskCategory, Weather};

/// Literal prefix of every join code.
pub const JOIN_CODE_PREFIX: &str = "SIM";

/// Inclusive range of the numeric part of a join code.
pub const JOIN_CODE_MIN: u16 = 1000;
pub const JOIN_CODE_MAX: u16 = 9999;

/// Facilitator-editable room configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub facilitator_name: String,
    pub facilitator_contact: String,
    pub organization: String,
    pub specialty: String,
    pub scenario_type: String,
    pub difficulty: Difficulty,
    /// Planned session length in minutes.
    pub target_duration_min: u32,
    pub max_participants: usize,
    pub risk_categories: Vec<RiskCategory>,
    pub weather: Weather,
    pub description: String,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            facilitator_name: String::new(),
            facilitator_contact: String::new(),
            organization: String::new(),
            specialty: "Work at height".to_string(),
            scenario_type: "Construction site".to_string(),
            difficulty: Difficulty::default(),
            target_duration_min: 30,
            max_participants: 20,
            risk_categories: RiskCategory::ALL.to_vec(),
            weather: Weather::default(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomConfigError {
    #[error("facilitator name is required")]
    EmptyFacilitatorName,
    #[error("facilitator contact is required")]
    EmptyFacilitatorContact,
    #[error("organization is required")]
    EmptyOrganization,
    #[error("room must allow at least one participant")]
    ZeroCapacity,
}

/// Validate a room configuration. Returns every problem found.
pub fn validate_room_config(config: &RoomConfig) -> Vec<RoomConfigError> {
    let mut errors = Vec::new();

    if config.facilitator_name.trim().is_empty() {
        errors.push(RoomConfigError::EmptyFacilitatorName);
    }
    if config.facilitator_contact.trim().is_empty() {
        errors.push(RoomConfigError::EmptyFacilitatorContact);
    }
    if config.organization.trim().is_empty() {
        errors.push(RoomConfigError::EmptyOrganization);
    }
    if config.max_participants == 0 {
        errors.push(RoomConfigError::ZeroCapacity);
    }

    errors
}

/// Render a join code from its numeric part.
pub fn format_join_code(number: u16) -> String {
    format!("{JOIN_CODE_PREFIX}-{number:04}")
}

/// Canonical form of a user-typed join code, or `None` if malformed.
///
/// Surrounding whitespace is ignored and letters are upper-cased. The
/// numeric part must be exactly four digits within the code range.
pub fn normalize_join_code(input: &str) -> Option<String> {
    let upper = input.trim().to_uppercase();
    let (prefix, digits) = upper.split_once('-')?;
    let well_formed = digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit());
    if prefix != JOIN_CODE_PREFIX || !well_formed {
        return None;
    }
    let number: u16 = digits.parse().ok()?;
    if !(JOIN_CODE_MIN..=JOIN_CODE_MAX).contains(&number) {
        return None;
    }
    Some(upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RoomConfig {
        RoomConfig {
            facilitator_name: "Michell".into(),
            facilitator_contact: "michell@example.org".into(),
            organization: "SST Institute".into(),
            ..RoomConfig::default()
        }
    }

    #[test]
    fn test_default_config_needs_facilitator() {
        let errors = validate_room_config(&RoomConfig::default());
        assert_eq!(
            errors,
            vec![
                RoomConfigError::EmptyFacilitatorName,
                RoomConfigError::EmptyFacilitatorContact,
                RoomConfigError::EmptyOrganization,
            ]
        );
    }

    #[test]
    fn test_filled_config_is_valid() {
        assert!(validate_room_config(&valid_config()).is_empty());
    }

    #[test]
    fn test_whitespace_only_fields_rejected() {
        let config = RoomConfig {
            organization: "  \t".into(),
            ..valid_config()
        };
        assert_eq!(
            validate_room_config(&config),
            vec![RoomConfigError::EmptyOrganization]
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = RoomConfig {
            max_participants: 0,
            ..valid_config()
        };
        assert_eq!(validate_room_config(&config), vec![RoomConfigError::ZeroCapacity]);
    }

    #[test]
    fn test_join_code_format() {
        assert_eq!(format_join_code(4821), "SIM-4821");
        assert_eq!(format_join_code(1000), "SIM-1000");
    }

    #[test]
    fn test_join_code_case_insensitive() {
        assert_eq!(normalize_join_code("sim-4821").as_deref(), Some("SIM-4821"));
        assert_eq!(normalize_join_code("  Sim-4821 ").as_deref(), Some("SIM-4821"));
        assert_eq!(normalize_join_code("SIM-4821").as_deref(), Some("SIM-4821"));
    }

    #[test]
    fn test_malformed_join_codes() {
        assert_eq!(normalize_join_code(""), None);
        assert_eq!(normalize_join_code("SIM4821"), None);
        assert_eq!(normalize_join_code("ABC-4821"), None);
        assert_eq!(normalize_join_code("SIM-482"), None);
        assert_eq!(normalize_join_code("SIM-48210"), None);
        assert_eq!(normalize_join_code("SIM-0999"), None);
        assert_eq!(normalize_join_code("SIM-12a4"), None);
        assert_eq!(normalize_join_code("SIM-+123"), None);
    }
}
