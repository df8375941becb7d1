//! Harness sensor scenarios and reading classification.
//!
//! The dashboard simulates an accelerometer and a tilt sensor on a
//! worker's harness. A reading is an incident when acceleration drops
//! toward free fall, spikes into overload, or the body tilts past the
//! tip-over angle.

use serde::{Deserialize, Serialize};

/// Standard gravity, the resting accelerometer value.
pub const GRAVITY: f32 = 9.8;

/// Acceleration below this suggests free fall (m/s²).
pub const FREE_FALL_ACCEL: f32 = 5.0;

/// Acceleration above this is a dangerous force on the harness (m/s²).
pub const OVERLOAD_ACCEL: f32 = 13.0;

/// Tilt above this risks tipping over (degrees).
pub const TIP_OVER_ANGLE: f32 = 60.0;

/// Tilt up to this is a safe posture (degrees).
pub const SAFE_ANGLE: f32 = 30.0;

/// Sensor sampling rate used by trace generation.
pub const SAMPLE_HZ: u32 = 10;

/// Allowed run length in seconds.
pub const MIN_DURATION_SECS: u32 = 5;
pub const MAX_DURATION_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorScenario {
    NormalWork,
    FreeFall,
    DangerousPosture,
    Overload,
}

impl SensorScenario {
    pub const ALL: [SensorScenario; 4] = [
        SensorScenario::NormalWork,
        SensorScenario::FreeFall,
        SensorScenario::DangerousPosture,
        SensorScenario::Overload,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NormalWork => "NORMAL WORK - Safe situation",
            Self::FreeFall => "FREE FALL - Maximum emergency",
            Self::DangerousPosture => "DANGEROUS POSTURE - Tip-over risk",
            Self::Overload => "OVERLOAD - Excessive forces",
        }
    }

    /// Whether the hazard phase is active at time `t` of a `duration` run.
    /// Every scenario except normal work turns hazardous halfway through.
    pub fn is_hazard_phase(self, t: f32, duration: f32) -> bool {
        self != Self::NormalWork && t >= duration / 2.0
    }

    /// Narrative shown next to the live status.
    pub fn explanation(self, hazard_phase: bool) -> &'static str {
        match (self, hazard_phase) {
            (Self::NormalWork, _) => "The worker is carrying out tasks safely",
            (Self::FreeFall, false) => "Worker carrying out normal tasks",
            (Self::FreeFall, true) => {
                "EMERGENCY! Acceleration below 5 m/s² indicates free fall"
            }
            (Self::DangerousPosture, false) => "Posture within safe limits",
            (Self::DangerousPosture, true) => "Angle above 60°! Tip-over risk",
            (Self::Overload, false) => "Forces within normal parameters",
            (Self::Overload, true) => "Excessive forces! The harness may be damaged",
        }
    }
}

/// Classification of a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    Normal,
    FreeFall,
    Overload,
    DangerousPosture,
}

/// Colour band for the worker figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    Safe,
    Caution,
    Danger,
}

impl ReadingStatus {
    pub fn is_incident(self) -> bool {
        self != Self::Normal
    }

    pub fn alert_level(self) -> AlertLevel {
        match self {
            Self::Normal => AlertLevel::Safe,
            Self::Overload => AlertLevel::Caution,
            Self::FreeFall | Self::DangerousPosture => AlertLevel::Danger,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL SITUATION",
            Self::FreeFall => "FALL DETECTED!",
            Self::Overload => "OVERLOAD DETECTED",
            Self::DangerousPosture => "DANGEROUS POSTURE",
        }
    }
}

/// Classify a reading. Free fall wins over overload, overload over posture.
pub fn classify_reading(acceleration: f32, angle_deg: f32) -> ReadingStatus {
    if acceleration < FREE_FALL_ACCEL {
        ReadingStatus::FreeFall
    } else if acceleration > OVERLOAD_ACCEL {
        ReadingStatus::Overload
    } else if angle_deg > TIP_OVER_ANGLE {
        ReadingStatus::DangerousPosture
    } else {
        ReadingStatus::Normal
    }
}

/// Posture band of a tilt angle on its own.
pub fn posture_level(angle_deg: f32) -> AlertLevel {
    if angle_deg > TIP_OVER_ANGLE {
        AlertLevel::Danger
    } else if angle_deg > SAFE_ANGLE {
        AlertLevel::Caution
    } else {
        AlertLevel::Safe
    }
}

pub fn clamp_duration(secs: u32) -> u32 {
    secs.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_reading_is_normal() {
        assert_eq!(classify_reading(GRAVITY, 10.0), ReadingStatus::Normal);
        assert!(!classify_reading(GRAVITY, 10.0).is_incident());
    }

    #[test]
    fn test_free_fall() {
        assert_eq!(classify_reading(2.0, 70.0), ReadingStatus::FreeFall);
        assert_eq!(classify_reading(4.99, 0.0), ReadingStatus::FreeFall);
        assert_eq!(classify_reading(5.0, 0.0), ReadingStatus::Normal);
    }

    #[test]
    fn test_overload() {
        assert_eq!(classify_reading(14.0, 20.0), ReadingStatus::Overload);
        assert_eq!(classify_reading(13.0, 20.0), ReadingStatus::Normal);
        assert_eq!(classify_reading(14.0, 75.0), ReadingStatus::Overload);
    }

    #[test]
    fn test_posture() {
        assert_eq!(classify_reading(9.8, 75.0), ReadingStatus::DangerousPosture);
        assert_eq!(classify_reading(9.8, 60.0), ReadingStatus::Normal);
    }

    #[test]
    fn test_alert_levels() {
        assert_eq!(ReadingStatus::Normal.alert_level(), AlertLevel::Safe);
        assert_eq!(ReadingStatus::Overload.alert_level(), AlertLevel::Caution);
        assert_eq!(ReadingStatus::FreeFall.alert_level(), AlertLevel::Danger);
        assert_eq!(ReadingStatus::DangerousPosture.alert_level(), AlertLevel::Danger);
    }

    #[test]
    fn test_posture_bands() {
        assert_eq!(posture_level(15.0), AlertLevel::Safe);
        assert_eq!(posture_level(30.0), AlertLevel::Safe);
        assert_eq!(posture_level(45.0), AlertLevel::Caution);
        assert_eq!(posture_level(61.0), AlertLevel::Danger);
    }

    #[test]
    fn test_hazard_phase_starts_halfway() {
        assert!(!SensorScenario::FreeFall.is_hazard_phase(7.4, 15.0));
        assert!(SensorScenario::FreeFall.is_hazard_phase(7.5, 15.0));
        assert!(!SensorScenario::NormalWork.is_hazard_phase(14.9, 15.0));
    }

    #[test]
    fn test_explanation_depends_on_phase() {
        for scenario in SensorScenario::ALL {
            let calm = scenario.explanation(false);
            let hazard = scenario.explanation(true);
            if scenario == SensorScenario::NormalWork {
                assert_eq!(calm, hazard);
            } else {
                assert_ne!(calm, hazard);
            }
        }
        assert!(SensorScenario::FreeFall.explanation(true).contains("free fall"));
    }

    #[test]
    fn test_duration_clamped() {
        assert_eq!(clamp_duration(1), 5);
        assert_eq!(clamp_duration(15), 15);
        assert_eq!(clamp_duration(60), 30);
    }
}
