//! Harness sensor trace generation.
//!
//! Produces a 10 Hz accelerometer and tilt trace for one scenario. The
//! first half of every run is ordinary work; hazardous scenarios switch
//! to their hazard profile for the second half.

use heightwatch_logic::sensors::{
    clamp_duration, classify_reading, ReadingStatus, SensorScenario, GRAVITY, SAMPLE_HZ,
};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Seconds since the start of the run.
    pub t: f32,
    pub acceleration: f32,
    pub angle: f32,
    pub status: ReadingStatus,
    pub hazard_phase: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorTrace {
    pub scenario: SensorScenario,
    pub duration_secs: u32,
    pub samples: Vec<SensorSample>,
    pub incidents: usize,
}

impl SensorTrace {
    /// Time of the first incident reading, if any.
    pub fn first_incident_at(&self) -> Option<f32> {
        self.samples
            .iter()
            .find(|s| s.status.is_incident())
            .map(|s| s.t)
    }

    pub fn peak_acceleration(&self) -> f32 {
        self.samples
            .iter()
            .map(|s| s.acceleration)
            .fold(0.0, f32::max)
    }

    pub fn max_angle(&self) -> f32 {
        self.samples.iter().map(|s| s.angle).fold(0.0, f32::max)
    }

    /// Narrative shown next to `sample` on the dashboard.
    pub fn explanation(&self, sample: &SensorSample) -> &'static str {
        self.scenario.explanation(sample.hazard_phase)
    }
}

/// Draw from N(mean, std_dev²).
fn gaussian(rng: &mut impl Rng, mean: f32, std_dev: f32) -> f32 {
    let z: f32 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Generate a trace for `scenario`. The duration is clamped to 5..=30 s.
pub fn generate_trace(
    scenario: SensorScenario,
    duration_secs: u32,
    rng: &mut impl Rng,
) -> SensorTrace {
    let duration_secs = clamp_duration(duration_secs);
    let duration = duration_secs as f32;
    let sample_count = duration_secs * SAMPLE_HZ;

    let mut samples = Vec::with_capacity(sample_count as usize);
    for i in 0..sample_count {
        let t = i as f32 / SAMPLE_HZ as f32;
        let hazard = scenario.is_hazard_phase(t, duration);
        let sway = (0.5 * t).sin() * 5.0;

        let (acceleration, angle) = match (scenario, hazard) {
            (SensorScenario::NormalWork, _) => (gaussian(rng, GRAVITY, 0.2), 10.0 + sway),
            (SensorScenario::FreeFall, true) => {
                (gaussian(rng, 2.0, 0.3), gaussian(rng, 70.0, 10.0))
            }
            (SensorScenario::DangerousPosture, true) => {
                (gaussian(rng, GRAVITY, 0.2), gaussian(rng, 75.0, 5.0))
            }
            (SensorScenario::FreeFall | SensorScenario::DangerousPosture, false) => {
                (gaussian(rng, GRAVITY, 0.2), gaussian(rng, 15.0, 5.0))
            }
            (SensorScenario::Overload, true) => (gaussian(rng, 14.0, 0.5), 20.0 + sway),
            (SensorScenario::Overload, false) => (gaussian(rng, GRAVITY, 0.2), 20.0 + sway),
        };

        samples.push(SensorSample {
            t,
            acceleration,
            angle,
            status: classify_reading(acceleration, angle),
            hazard_phase: hazard,
        });
    }

    let incidents = samples.iter().filter(|s| s.status.is_incident()).count();
    log::debug!(
        "Generated {} trace: {} samples, {} incidents",
        scenario.name(),
        samples.len(),
        incidents
    );

    SensorTrace {
        scenario,
        duration_secs,
        samples,
        incidents,
    }
}
