//! Input contracts for the controller.
//!
//! Adapters that cannot call the controller's methods directly (scripted
//! hosts, replayed sessions) build these and pass them into
//! `PhaseController::update_with_inputs()` each tick.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Inputs {
    /// Commands applied in order before stepping.
    #[serde(default)]
    pub commands: Vec<ButtonCommand>,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ButtonCommand {
    Press,
    Load,
    Succeed,
    Fail,
    Reset,
    SetDisabled { disabled: bool },
}

impl Inputs {
    pub fn new(commands: impl IntoIterator<Item = ButtonCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}
