//! Output contracts from the controller.
//!
//! Outputs carry the signals sampled for this tick and the semantic events
//! produced since the previous tick (operations called between ticks queue
//! their events and they are delivered with the next update).

use serde::{Deserialize, Serialize};

use crate::bank::Signals;
use crate::ids::TransitionId;
use crate::phase::Phase;

/// Primary-scalar transition kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    Press,
    Load,
    Succeed,
    Fail,
    Reset,
    Disable,
    Enable,
}

impl TransitionKind {
    /// Callback fired when a transition of this kind settles.
    pub fn callback(self) -> Option<CallbackKind> {
        match self {
            TransitionKind::Press => Some(CallbackKind::Press),
            TransitionKind::Load => Some(CallbackKind::Load),
            TransitionKind::Succeed => Some(CallbackKind::Success),
            TransitionKind::Fail => Some(CallbackKind::Error),
            TransitionKind::Reset => Some(CallbackKind::Reset),
            TransitionKind::Disable | TransitionKind::Enable => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallbackKind {
    Press,
    Load,
    Success,
    Error,
    Reset,
    SecondaryPress,
}

/// Micro-scalar pulse kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pulse {
    Scale,
    Shake,
}

/// Discrete semantic signals emitted by the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
#[non_exhaustive]
pub enum ButtonEvent {
    PhaseChanged {
        from: Phase,
        to: Phase,
        is_error: bool,
        transition: TransitionId,
    },
    TransitionSettled {
        kind: TransitionKind,
        transition: TransitionId,
    },
    TransitionInterrupted {
        kind: TransitionKind,
        transition: TransitionId,
    },
    /// A callback slot was triggered (whether or not a callback is registered).
    Callback {
        callback: CallbackKind,
    },
    PressIgnored {
        phase: Phase,
        disabled: bool,
    },
    DisabledChanged {
        disabled: bool,
    },
    PulseStarted {
        pulse: Pulse,
    },
    PulseFinished {
        pulse: Pulse,
    },
    PulseInterrupted {
        pulse: Pulse,
    },
}

/// Outputs returned by `PhaseController::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<ButtonEvent>,
    #[serde(default)]
    pub signals: Option<Signals>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.signals = None;
    }

    /// Number of times `callback` was triggered this tick.
    pub fn callback_count(&self, callback: CallbackKind) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ButtonEvent::Callback { callback: c } if *c == callback))
            .count()
    }
}
