//! Animated scalar: a continuous value driven toward a target by at most one
//! in-flight animation.
//!
//! Starting a new animation retargets the scalar from its current value (and,
//! for springs, current velocity) and reports the superseded animation as
//! unfinished. Stepping reports a finished completion exactly once, when the
//! in-flight animation settles.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::driver::{Animation, SpringConfig, TimingStep};
use crate::ids::TransitionId;
use crate::interp::functions::lerp_f32;

/// Largest integration step for springs; longer frames are sub-stepped.
const SPRING_SUBSTEP_S: f32 = 1.0 / 240.0;

/// Completion report for an animation tagged with `transition`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub transition: TransitionId,
    /// `true` when the animation reached its target, `false` when superseded.
    pub finished: bool,
}

#[derive(Clone, Debug)]
enum Driver {
    Spring {
        to: f32,
        config: SpringConfig,
    },
    Timed {
        steps: Vec<TimingStep>,
        index: usize,
        from: f32,
        elapsed_ms: f32,
    },
}

#[derive(Clone, Debug)]
struct InFlight {
    transition: TransitionId,
    driver: Driver,
}

#[derive(Clone, Debug, Default)]
pub struct AnimatedScalar {
    value: f32,
    velocity: f32,
    in_flight: Option<InFlight>,
}

impl AnimatedScalar {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            in_flight: None,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Transition id of the in-flight animation, if any.
    pub fn transition(&self) -> Option<TransitionId> {
        self.in_flight.as_ref().map(|f| f.transition)
    }

    /// Final resting target of the in-flight animation, if any.
    pub fn target(&self) -> Option<f32> {
        self.in_flight.as_ref().and_then(|f| match &f.driver {
            Driver::Spring { to, .. } => Some(*to),
            Driver::Timed { steps, .. } => steps.last().map(|s| s.to),
        })
    }

    /// `true` while a spring (rather than a timed animation) is in flight.
    pub fn is_spring(&self) -> bool {
        matches!(
            self.in_flight,
            Some(InFlight {
                driver: Driver::Spring { .. },
                ..
            })
        )
    }

    /// Start `animation`, superseding whatever is in flight. Returns the
    /// unfinished completion of the superseded animation.
    pub fn start(&mut self, animation: Animation, transition: TransitionId) -> Option<Completion> {
        let interrupted = self.interrupt();
        let driver = match animation {
            Animation::Spring { to, config } => Driver::Spring {
                to,
                config: config.sanitized(),
            },
            Animation::Timing(step) => self.timed(vec![step]),
            Animation::Sequence { steps } => self.timed(steps),
        };
        self.in_flight = Some(InFlight { transition, driver });
        interrupted
    }

    fn interrupt(&mut self) -> Option<Completion> {
        self.in_flight.take().map(|f| Completion {
            transition: f.transition,
            finished: false,
        })
    }

    fn timed(&mut self, steps: Vec<TimingStep>) -> Driver {
        self.velocity = 0.0;
        Driver::Timed {
            steps,
            index: 0,
            from: self.value,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt` seconds. Returns the finished completion when the
    /// in-flight animation settles during this step.
    pub fn step(&mut self, dt: f32) -> Option<Completion> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let flight = self.in_flight.as_mut()?;
        let settled = match &mut flight.driver {
            Driver::Spring { to, config } => {
                step_spring(&mut self.value, &mut self.velocity, *to, config, dt)
            }
            Driver::Timed {
                steps,
                index,
                from,
                elapsed_ms,
            } => step_timed(&mut self.value, steps.as_slice(), index, from, elapsed_ms, dt),
        };
        if !settled {
            return None;
        }
        let transition = flight.transition;
        self.in_flight = None;
        Some(Completion {
            transition,
            finished: true,
        })
    }
}

/// Semi-implicit Euler over sub-steps no longer than
/// [`SPRING_SUBSTEP_S`] or the config's stable bound. Snaps to `to` once at
/// rest, or when integration left the finite range.
fn step_spring(
    value: &mut f32,
    velocity: &mut f32,
    to: f32,
    config: &SpringConfig,
    dt: f32,
) -> bool {
    let at_rest = |value: f32, velocity: f32| {
        (value - to).abs() < config.rest_displacement && velocity.abs() < config.rest_speed
    };
    if !at_rest(*value, *velocity) {
        let max_h = SPRING_SUBSTEP_S.min(config.max_step());
        let substeps = (dt / max_h).ceil().max(0.0) as u32;
        let h = if substeps > 0 { dt / substeps as f32 } else { 0.0 };
        let inv_mass = 1.0 / config.mass;
        for _ in 0..substeps {
            let displacement = *value - to;
            let spring_force = -config.stiffness * displacement;
            let damping_force = -config.damping * *velocity;
            let acceleration = (spring_force + damping_force) * inv_mass;
            *velocity += acceleration * h;
            *value += *velocity * h;
            if at_rest(*value, *velocity) || !value.is_finite() || !velocity.is_finite() {
                break;
            }
        }
    }
    if !value.is_finite() || !velocity.is_finite() {
        warn!("spring toward {to} diverged; snapping to target");
        *value = to;
        *velocity = 0.0;
        return true;
    }
    if at_rest(*value, *velocity) {
        *value = to;
        *velocity = 0.0;
        true
    } else {
        false
    }
}

/// Walks the step list, carrying leftover time into the next step.
fn step_timed(
    value: &mut f32,
    steps: &[TimingStep],
    index: &mut usize,
    from: &mut f32,
    elapsed_ms: &mut f32,
    dt: f32,
) -> bool {
    *elapsed_ms += dt * 1000.0;
    while let Some(step) = steps.get(*index) {
        let duration = step.duration_ms as f32;
        if *elapsed_ms >= duration {
            *elapsed_ms -= duration;
            *value = step.to;
            *from = step.to;
            *index += 1;
            continue;
        }
        let progress = step.easing.apply(*elapsed_ms / duration);
        *value = lerp_f32(*from, step.to, progress);
        return false;
    }
    true
}
