//! Per-frame presentation snapshot handed to the host renderer.
//!
//! The host owns actual drawing (label text, icons, the loading indicator and
//! the touch wrapper); this module only decides which of them to show and
//! with which animated values.

use serde::{Deserialize, Serialize};

use crate::bank::Signals;
use crate::color::Rgba;
use crate::config::ButtonConfig;
use crate::phase::{ButtonState, Outcome, Phase};

/// Touch-target wrapper variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchVariant {
    Opacity,
    Bounce,
}

/// Whole-button transform. Errors shake sideways; everything else scales.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Transform {
    Scale(f32),
    TranslateX(f32),
}

/// What the button body shows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Content {
    /// Text label, or an icon standing in for it.
    Label {
        text: Option<String>,
        icon: Option<String>,
    },
    /// Loading indicator.
    Indicator,
    /// Outcome icon.
    Icon {
        outcome: Outcome,
        name: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touch {
    pub variant: TouchVariant,
    /// The wrapper accepts touches at all.
    pub enabled: bool,
    /// Touches are routed to the secondary press callback.
    pub secondary: bool,
}

impl Touch {
    /// Busy buttons are inert; settled buttons only accept a secondary press.
    pub fn resolve(
        variant: TouchVariant,
        state: ButtonState,
        disabled: bool,
        has_secondary: bool,
    ) -> Self {
        let settled = state.phase == Phase::Settled;
        let enabled = !disabled && state.phase != Phase::Pending && (!settled || has_secondary);
        Self {
            variant,
            enabled,
            secondary: settled && has_secondary,
        }
    }
}

/// Which outcome track and transform are on screen. These follow the
/// committed state except while an outgoing outcome is still visible: a
/// reset from error keeps the error colors until the primary scalar drops
/// below `Pending`, and a running pulse keeps its own transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Look {
    pub error_track: bool,
    pub shake: bool,
}

impl Look {
    /// The look a state has once nothing is animating.
    pub fn settled(state: ButtonState) -> Self {
        let is_error = state.phase == Phase::Settled && state.is_error;
        Self {
            error_track: is_error,
            shake: is_error,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub state: ButtonState,
    pub disabled: bool,
    pub background: Rgba,
    pub foreground: Rgba,
    pub border: Rgba,
    pub width: f32,
    pub height: f32,
    pub border_radius: f32,
    pub icon_size: f32,
    pub transform: Transform,
    pub content: Content,
    pub touch: Touch,
}

impl Presentation {
    pub fn build(
        config: &ButtonConfig,
        state: ButtonState,
        disabled: bool,
        signals: &Signals,
        look: Look,
        touch: Touch,
    ) -> Self {
        let transform = if look.shake {
            Transform::TranslateX(signals.shake)
        } else {
            Transform::Scale(signals.scale)
        };
        let content = match state.outcome() {
            Some(outcome) => Content::Icon {
                outcome,
                name: match outcome {
                    Outcome::Success => config.success_icon_name.clone(),
                    Outcome::Error => config.error_icon_name.clone(),
                },
            },
            None if state.phase == Phase::Pending => Content::Indicator,
            None => Content::Label {
                text: config.label.clone(),
                icon: config.label_icon.clone(),
            },
        };
        Self {
            state,
            disabled,
            background: signals.background(look.error_track),
            foreground: signals.foreground(look.error_track),
            border: signals.border(look.error_track),
            width: signals.width,
            height: config.height(),
            border_radius: config.border_radius(),
            icon_size: config.icon_size(),
            transform,
            content,
            touch,
        }
    }
}
