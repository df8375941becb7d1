//! Physical overload scoring from body weight and carried tools.

use serde::{Deserialize, Serialize};

use crate::profile::ParticipantProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OverloadLevel {
    /// Score >= 5.
    Alert,
    /// Score 3..5.
    Warning,
    None,
}

impl OverloadLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= 5 {
            Self::Alert
        } else if score >= 3 {
            Self::Warning
        } else {
            Self::None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Alert => "ALERT",
            Self::Warning => "WARNING",
            Self::None => "NONE",
        }
    }
}

/// Weight tier contribution. Tiers are exclusive; only the highest applies.
fn weight_points(weight_kg: f32) -> u32 {
    if weight_kg > 100.0 {
        3
    } else if weight_kg > 85.0 {
        2
    } else if weight_kg > 70.0 {
        1
    } else {
        0
    }
}

fn tool_count_points(count: usize) -> u32 {
    if count > 4 {
        3
    } else if count > 2 {
        2
    } else {
        0
    }
}

pub fn overload_score(profile: &ParticipantProfile) -> u32 {
    let heavy = profile.tools.iter().filter(|t| t.is_heavy()).count() as u32;
    weight_points(profile.weight_kg) + tool_count_points(profile.tools.len()) + heavy * 2
}

pub fn score_overload(profile: &ParticipantProfile) -> OverloadLevel {
    OverloadLevel::from_score(overload_score(profile))
}
