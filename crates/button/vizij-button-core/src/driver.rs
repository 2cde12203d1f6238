//! Animation descriptions: springs, timed steps and sequences of timed steps.
//!
//! These are plain data; [`AnimatedScalar`](crate::scalar::AnimatedScalar)
//! owns the integration state while one of them is in flight.

use serde::{Deserialize, Serialize};

use crate::interp::functions::bezier_ease;

/// Damped spring parameters. Defaults match a tension 40 / friction 7 spring.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// The spring is at rest once |value - target| falls below this...
    pub rest_displacement: f32,
    /// ...and |velocity| below this.
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 230.2,
            damping: 22.0,
            mass: 1.0,
            rest_displacement: 0.001,
            rest_speed: 0.001,
        }
    }
}

impl SpringConfig {
    const MIN_MASS: f32 = 1.0e-4;
    /// Stiffness is capped so that `sqrt(k / m)` stays at or below this (rad/s).
    const MAX_NATURAL_FREQUENCY: f32 = 2000.0;
    /// Damping is capped so that `c / m` stays at or below this (1/s).
    const MAX_DAMPING_RATE: f32 = 4000.0;

    /// Replace parameters that could never settle with usable values.
    ///
    /// Stiffness, damping and both rest thresholds must be finite and
    /// strictly positive, otherwise the default is used. Stiffness and
    /// damping are capped relative to the mass so that
    /// [`max_step`](Self::max_step) stays bounded.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        let mass = if self.mass.is_finite() {
            self.mass.max(Self::MIN_MASS)
        } else {
            d.mass
        };
        let max_stiffness = mass * Self::MAX_NATURAL_FREQUENCY * Self::MAX_NATURAL_FREQUENCY;
        Self {
            stiffness: positive(self.stiffness, d.stiffness).min(max_stiffness),
            damping: positive(self.damping, d.damping).min(mass * Self::MAX_DAMPING_RATE),
            mass,
            rest_displacement: positive(self.rest_displacement, d.rest_displacement),
            rest_speed: positive(self.rest_speed, d.rest_speed),
        }
    }

    /// Largest semi-implicit Euler step that is stable for these parameters
    /// (`h * sqrt(k / m) <= 1` and `h * c / m <= 1`). Expects sanitized values.
    pub fn max_step(&self) -> f32 {
        let natural_frequency = (self.stiffness / self.mass).sqrt();
        let damping_rate = self.damping / self.mass;
        (1.0 / natural_frequency).min(1.0 / damping_rate)
    }
}

/// Easing curve applied to a timed step's normalized progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Easing {
    Linear,
    #[default]
    EaseInOut,
    CubicBezier {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::EaseInOut => bezier_ease(t, 0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier { x1, y1, x2, y2 } => bezier_ease(t, x1, y1, x2, y2),
        }
    }
}

/// A fixed-duration move to `to`, starting from wherever the scalar is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingStep {
    pub to: f32,
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
}

impl TimingStep {
    pub fn new(to: f32, duration_ms: u32) -> Self {
        Self {
            to,
            duration_ms,
            easing: Easing::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Animation {
    Spring { to: f32, config: SpringConfig },
    Timing(TimingStep),
    Sequence { steps: Vec<TimingStep> },
}

impl Animation {
    pub fn spring(to: f32, config: SpringConfig) -> Self {
        Animation::Spring { to, config }
    }
}

/// Two-step scale pulse: ramp to the peak and back to rest.
pub fn scale_pulse(step_ms: u32) -> Animation {
    Animation::Sequence {
        steps: vec![TimingStep::new(1.0, step_ms), TimingStep::new(0.0, step_ms)],
    }
}

/// Three-step shake: settle at rest, swing through both extremes, return to rest.
pub fn shake(step_ms: u32) -> Animation {
    Animation::Sequence {
        steps: vec![
            TimingStep::new(0.0, step_ms),
            TimingStep::new(2.0, step_ms),
            TimingStep::new(0.0, step_ms),
        ],
    }
}
