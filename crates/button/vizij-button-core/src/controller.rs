//! PhaseController: owns the committed button state and both animated scalars.
//!
//! Methods:
//! - press, load, succeed, fail, reset, set_disabled (commit state, start animation)
//! - update (step scalars → deliver completions → sample signals)
//!
//! Every primary transition takes a fresh generation from [`GenerationCounter`].
//! A completion only triggers its callback when it finished *and* its
//! generation is still current, so a superseded transition can never fire.

use std::fmt;

use log::{debug, trace};

use crate::bank::{InterpolationBank, Signals};
use crate::config::{ButtonConfig, ConfigError};
use crate::driver::{scale_pulse, shake, Animation, TimingStep};
use crate::ids::{GenerationCounter, TransitionId};
use crate::inputs::{ButtonCommand, Inputs};
use crate::outputs::{ButtonEvent, CallbackKind, Outputs, Pulse, TransitionKind};
use crate::phase::{ButtonState, Phase};
use crate::presentation::{Look, Presentation, Touch};
use crate::scalar::{AnimatedScalar, Completion};

pub type Callback = Box<dyn FnMut()>;

/// Host callbacks. Every slot is optional.
#[derive(Default)]
pub struct Callbacks {
    on_press: Option<Callback>,
    on_load: Option<Callback>,
    on_success: Option<Callback>,
    on_error: Option<Callback>,
    on_reset: Option<Callback>,
    on_secondary_press: Option<Callback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    pub fn on_load(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_load = Some(Box::new(f));
        self
    }

    pub fn on_success(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_reset(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(f));
        self
    }

    /// Only reachable while the button is settled.
    pub fn on_secondary_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_secondary_press = Some(Box::new(f));
        self
    }

    pub fn has_secondary_press(&self) -> bool {
        self.on_secondary_press.is_some()
    }

    fn slot(&mut self, kind: CallbackKind) -> &mut Option<Callback> {
        match kind {
            CallbackKind::Press => &mut self.on_press,
            CallbackKind::Load => &mut self.on_load,
            CallbackKind::Success => &mut self.on_success,
            CallbackKind::Error => &mut self.on_error,
            CallbackKind::Reset => &mut self.on_reset,
            CallbackKind::SecondaryPress => &mut self.on_secondary_press,
        }
    }

    fn fire(&mut self, kind: CallbackKind) {
        if let Some(cb) = self.slot(kind) {
            cb();
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_press", &self.on_press.is_some())
            .field("on_load", &self.on_load.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_reset", &self.on_reset.is_some())
            .field("on_secondary_press", &self.on_secondary_press.is_some())
            .finish()
    }
}

/// An animation the controller is waiting on, tagged with what it means.
#[derive(Copy, Clone, Debug)]
struct Tagged<K> {
    transition: TransitionId,
    kind: K,
}

#[derive(Debug)]
pub struct PhaseController {
    config: ButtonConfig,
    bank: InterpolationBank,
    state: ButtonState,
    disabled: bool,
    // Outcome track on screen; lags `state` while leaving Settled
    error_track: bool,

    primary: AnimatedScalar,
    micro: AnimatedScalar,
    generations: GenerationCounter,
    pulse_ids: GenerationCounter,
    transition: Option<Tagged<TransitionKind>>,
    pulse: Option<Tagged<Pulse>>,

    callbacks: Callbacks,
    // Events produced since the last update
    queued: Vec<ButtonEvent>,
    outputs: Outputs,
}

impl PhaseController {
    /// Build a controller at rest in the configured initial state. Nothing
    /// animates until the first operation.
    pub fn new(config: ButtonConfig, callbacks: Callbacks) -> Self {
        let state = ButtonState::initial(config.disabled, config.initial_state);
        let bank = InterpolationBank::new(config.resolve_tables());
        debug!(
            "button created in {:?} (error={}, disabled={})",
            state.phase, state.is_error, config.disabled
        );
        Self {
            disabled: config.disabled,
            error_track: Look::settled(state).error_track,
            primary: AnimatedScalar::new(state.phase.rest_value()),
            micro: AnimatedScalar::new(0.0),
            generations: GenerationCounter::new(),
            pulse_ids: GenerationCounter::new(),
            transition: None,
            pulse: None,
            callbacks,
            queued: Vec::new(),
            outputs: Outputs::default(),
            config,
            bank,
            state,
        }
    }

    pub fn from_json(json: &str, callbacks: Callbacks) -> Result<Self, ConfigError> {
        Ok(Self::new(ButtonConfig::from_json(json)?, callbacks))
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn bank(&self) -> &InterpolationBank {
        &self.bank
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn primary(&self) -> &AnimatedScalar {
        &self.primary
    }

    pub fn micro(&self) -> &AnimatedScalar {
        &self.micro
    }

    /// Generation of the most recent primary transition (0 before any).
    pub fn current_transition(&self) -> TransitionId {
        self.generations.current()
    }

    /// `true` while either scalar is moving.
    pub fn is_animating(&self) -> bool {
        self.primary.is_animating() || self.micro.is_animating()
    }

    pub fn signals(&self) -> Signals {
        self.bank.sample(self.primary.value(), self.micro.value())
    }

    /// Outcome track and transform currently presented.
    pub fn look(&self) -> Look {
        let shake = match self.pulse {
            Some(pulse) => pulse.kind == Pulse::Shake,
            None => self.error_track,
        };
        Look {
            error_track: self.error_track,
            shake,
        }
    }

    pub fn presentation(&self) -> Presentation {
        let touch = Touch::resolve(
            self.config.touch_variant(),
            self.state,
            self.disabled,
            self.callbacks.has_secondary_press(),
        );
        Presentation::build(
            &self.config,
            self.state,
            self.disabled,
            &self.signals(),
            self.look(),
            touch,
        )
    }

    /// User press. Ignored while disabled or busy; in the settled phase it
    /// goes to the secondary press callback when one is registered.
    pub fn press(&mut self) {
        if self.disabled {
            self.ignore_press();
            return;
        }
        match self.state.phase {
            Phase::Pending => self.ignore_press(),
            Phase::Settled => {
                if self.callbacks.has_secondary_press() {
                    self.trigger(CallbackKind::SecondaryPress);
                } else {
                    self.ignore_press();
                }
            }
            Phase::Idle | Phase::Loading => {
                if self.config.is_static {
                    self.trigger(CallbackKind::Press);
                } else {
                    self.spring_to(TransitionKind::Press, Phase::Pending, false);
                }
            }
        }
    }

    pub fn load(&mut self) {
        self.spring_to(TransitionKind::Load, Phase::Pending, false);
    }

    pub fn succeed(&mut self) {
        self.spring_to(TransitionKind::Succeed, Phase::Settled, false);
        if self.config.scale_on_success {
            self.start_pulse(Pulse::Scale);
        }
    }

    pub fn fail(&mut self) {
        self.spring_to(TransitionKind::Fail, Phase::Settled, true);
        if self.config.shake_on_error {
            self.start_pulse(Pulse::Shake);
        }
    }

    /// Back to the interactive rest (or the inert rest while disabled).
    pub fn reset(&mut self) {
        let target = if self.disabled {
            Phase::Idle
        } else {
            Phase::Loading
        };
        self.spring_to(TransitionKind::Reset, target, false);
    }

    /// External enable/disable. Moves between the two resting phases with a
    /// timed animation; busy or settled buttons only record the flag.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        debug!("button disabled={disabled} in {:?}", self.state.phase);
        self.queued.push(ButtonEvent::DisabledChanged { disabled });

        let (target, kind) = if disabled {
            (Phase::Idle, TransitionKind::Disable)
        } else {
            (Phase::Loading, TransitionKind::Enable)
        };
        if self.state.phase.is_resting() && self.state.phase != target {
            let anim = &self.config.animation;
            let timing = Animation::Timing(TimingStep {
                to: target.rest_value(),
                duration_ms: anim.disable_duration_ms,
                easing: anim.disable_easing,
            });
            self.begin(
                kind,
                ButtonState {
                    phase: target,
                    is_error: false,
                },
                timing,
            );
        }
    }

    pub fn apply(&mut self, command: ButtonCommand) {
        match command {
            ButtonCommand::Press => self.press(),
            ButtonCommand::Load => self.load(),
            ButtonCommand::Succeed => self.succeed(),
            ButtonCommand::Fail => self.fail(),
            ButtonCommand::Reset => self.reset(),
            ButtonCommand::SetDisabled { disabled } => self.set_disabled(disabled),
        }
    }

    /// Step both scalars by `dt` seconds, deliver completions (firing
    /// callbacks) and sample this tick's signals.
    pub fn update(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();

        if let Some(done) = self.primary.step(dt) {
            self.settle(done);
        }
        if let Some(done) = self.micro.step(dt) {
            self.pulse_settled(done);
        }
        self.refresh_error_track();

        self.outputs.events.append(&mut self.queued);
        self.outputs.signals = Some(self.signals());
        &self.outputs
    }

    /// Apply `inputs` in order, then [`update`](Self::update).
    pub fn update_with_inputs(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        for command in inputs.commands {
            self.apply(command);
        }
        self.update(dt)
    }

    fn spring_to(&mut self, kind: TransitionKind, phase: Phase, is_error: bool) {
        let spring = Animation::spring(phase.rest_value(), self.config.animation.spring);
        self.begin(kind, ButtonState { phase, is_error }, spring);
    }

    /// Commit `next` synchronously, then retarget the primary scalar.
    fn begin(&mut self, kind: TransitionKind, next: ButtonState, animation: Animation) {
        let from = self.state;
        self.state = next;
        let transition = self.generations.advance();
        debug!(
            "button {kind:?}: {:?} -> {:?} (error={}) as transition {}",
            from.phase, next.phase, next.is_error, transition.0
        );
        if from != next {
            self.queued.push(ButtonEvent::PhaseChanged {
                from: from.phase,
                to: next.phase,
                is_error: next.is_error,
                transition,
            });
        }
        if next.phase == Phase::Settled {
            self.error_track = next.is_error;
        }
        if let Some(stale) = self.primary.start(animation, transition) {
            self.superseded(stale);
        }
        self.transition = Some(Tagged { transition, kind });
    }

    /// Leaving Settled keeps the outgoing outcome's colors until the primary
    /// scalar is below `Pending`, where both tracks agree, or has settled.
    fn refresh_error_track(&mut self) {
        if self.state.phase == Phase::Settled || self.error_track == self.state.is_error {
            return;
        }
        if !self.primary.is_animating() || self.primary.value() < Phase::Pending.rest_value() {
            trace!("button leaves the error track at {}", self.primary.value());
            self.error_track = self.state.is_error;
        }
    }

    fn superseded(&mut self, stale: Completion) {
        match self.transition.take() {
            Some(prev) if prev.transition == stale.transition => {
                debug!(
                    "button transition {} ({:?}) superseded before settling",
                    prev.transition.0, prev.kind
                );
                self.queued.push(ButtonEvent::TransitionInterrupted {
                    kind: prev.kind,
                    transition: prev.transition,
                });
            }
            other => self.transition = other,
        }
    }

    fn settle(&mut self, done: Completion) {
        if !done.finished || !self.generations.is_current(done.transition) {
            debug!("dropping stale completion of transition {}", done.transition.0);
            return;
        }
        let Some(flight) = self.transition.take() else {
            return;
        };
        if flight.transition != done.transition {
            self.transition = Some(flight);
            return;
        }
        trace!(
            "button transition {} ({:?}) settled at {}",
            flight.transition.0,
            flight.kind,
            self.primary.value()
        );
        self.queued.push(ButtonEvent::TransitionSettled {
            kind: flight.kind,
            transition: flight.transition,
        });
        if let Some(callback) = flight.kind.callback() {
            self.trigger(callback);
        }
    }

    fn trigger(&mut self, callback: CallbackKind) {
        trace!("button callback {callback:?}");
        self.queued.push(ButtonEvent::Callback { callback });
        self.callbacks.fire(callback);
    }

    fn ignore_press(&mut self) {
        debug!(
            "button press ignored in {:?} (disabled={})",
            self.state.phase, self.disabled
        );
        self.queued.push(ButtonEvent::PressIgnored {
            phase: self.state.phase,
            disabled: self.disabled,
        });
    }

    fn start_pulse(&mut self, pulse: Pulse) {
        let anim = &self.config.animation;
        let animation = match pulse {
            Pulse::Scale => scale_pulse(anim.pulse_step_ms),
            Pulse::Shake => shake(anim.shake_step_ms),
        };
        let id = self.pulse_ids.advance();
        if let Some(stale) = self.micro.start(animation, id) {
            match self.pulse.take() {
                Some(prev) if prev.transition == stale.transition => {
                    self.queued
                        .push(ButtonEvent::PulseInterrupted { pulse: prev.kind });
                }
                _ => {}
            }
        }
        debug!("button {pulse:?} pulse started");
        self.pulse = Some(Tagged {
            transition: id,
            kind: pulse,
        });
        self.queued.push(ButtonEvent::PulseStarted { pulse });
    }

    fn pulse_settled(&mut self, done: Completion) {
        match self.pulse.take() {
            Some(p) if p.transition == done.transition => {
                trace!("button {:?} pulse finished", p.kind);
                self.queued.push(ButtonEvent::PulseFinished { pulse: p.kind });
            }
            other => self.pulse = other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superseded_completion_is_dropped_by_generation() {
        let mut c = PhaseController::new(ButtonConfig::default(), Callbacks::new());
        c.fail();
        let stale = c.current_transition();
        c.succeed();
        // A late report for the superseded transition must not settle anything
        c.settle(Completion {
            transition: stale,
            finished: true,
        });
        assert!(c.transition.is_some());
        assert!(c.queued.iter().all(|e| !matches!(e, ButtonEvent::Callback { .. })));
    }

    #[test]
    fn unfinished_completion_never_triggers() {
        let mut c = PhaseController::new(ButtonConfig::default(), Callbacks::new());
        c.load();
        let current = c.current_transition();
        c.settle(Completion {
            transition: current,
            finished: false,
        });
        assert!(c.transition.is_some());
    }

    #[test]
    fn callbacks_debug_lists_registered_slots() {
        let cbs = Callbacks::new().on_press(|| {});
        let dbg = format!("{cbs:?}");
        assert!(dbg.contains("on_press: true"));
        assert!(dbg.contains("on_error: false"));
    }
}
