//! Discrete lifecycle phases and the committed button state.

use serde::{Deserialize, Serialize};

/// Ordered lifecycle phase. The discriminant doubles as the keyframe index
/// and as the primary scalar's rest value.
///
/// - `Idle`: inert rest. A disabled button sits here, below the interactive rest.
/// - `Loading`: interactive rest. The label is shown and a press starts loading.
/// - `Pending`: busy. Entered by `press`/`load`; the indicator is shown.
/// - `Settled`: outcome shown (success or error icon).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle = 0,
    Loading = 1,
    Pending = 2,
    Settled = 3,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Idle, Phase::Loading, Phase::Pending, Phase::Settled];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rest value of the primary scalar for this phase.
    #[inline]
    pub fn rest_value(self) -> f32 {
        self.index() as f32
    }

    /// Resting phases are the ones `set_disabled` moves between.
    #[inline]
    pub fn is_resting(self) -> bool {
        matches!(self, Phase::Idle | Phase::Loading)
    }
}

/// Outcome shown in the `Settled` phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

/// Initial state requested by configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    #[default]
    None,
    Loading,
    Success,
    Error,
}

/// Committed phase plus the error flag. `is_error` only matters in `Settled`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    pub phase: Phase,
    pub is_error: bool,
}

impl ButtonState {
    /// Resolve the construction-time state from the `disabled` and
    /// `initial_state` options.
    pub fn initial(disabled: bool, initial: InitialState) -> Self {
        match initial {
            InitialState::None => Self {
                phase: if disabled { Phase::Idle } else { Phase::Loading },
                is_error: false,
            },
            InitialState::Loading => Self {
                phase: Phase::Pending,
                is_error: false,
            },
            InitialState::Success => Self {
                phase: Phase::Settled,
                is_error: false,
            },
            InitialState::Error => Self {
                phase: Phase::Settled,
                is_error: true,
            },
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match (self.phase, self.is_error) {
            (Phase::Settled, false) => Some(Outcome::Success),
            (Phase::Settled, true) => Some(Outcome::Error),
            _ => None,
        }
    }
}
