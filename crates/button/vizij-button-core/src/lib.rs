//! Vizij Button Core (engine-agnostic)
//!
//! State machine and animation engine for a feedback button that moves
//! through idle, loading, pending and settled (success/error) phases. Two
//! animated scalars drive the visuals: a primary scalar whose rest values are
//! the phase indices, and a micro scalar used for success/error pulses. The
//! [`InterpolationBank`] maps both onto colors, width, scale and shake.
//!
//! Hosts own rendering and the frame clock: call [`PhaseController::update`]
//! once per frame and draw from [`PhaseController::presentation`].

pub mod bank;
pub mod color;
pub mod config;
pub mod controller;
pub mod driver;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod phase;
pub mod presentation;
pub mod scalar;

// Re-exports for hosts
pub use bank::{InterpolationBank, KeyframeTable, OutcomeTracks, PhaseTables, Signals};
pub use color::{ColorParseError, Rgba};
pub use config::{AnimationConfig, ButtonConfig, ColorOverrides, ConfigError, Palette};
pub use controller::{Callback, Callbacks, PhaseController};
pub use driver::{scale_pulse, shake, Animation, Easing, SpringConfig, TimingStep};
pub use ids::{GenerationCounter, TransitionId};
pub use inputs::{ButtonCommand, Inputs};
pub use interp::{Interpolation, Lerp};
pub use outputs::{ButtonEvent, CallbackKind, Outputs, Pulse, TransitionKind};
pub use phase::{ButtonState, InitialState, Outcome, Phase};
pub use presentation::{Content, Look, Presentation, Touch, TouchVariant, Transform};
pub use scalar::{AnimatedScalar, Completion};
