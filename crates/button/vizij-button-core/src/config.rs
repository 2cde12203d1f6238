//! Button configuration and its one-time resolution into keyframe tables.
//!
//! Colors are accepted as strings so that a bad value never prevents a
//! button from being built: unparseable entries are logged and skipped, and
//! resolution falls through `explicit override → general foreground/background
//! → palette default`.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bank::{KeyframeTable, OutcomeTracks, PhaseTables};
use crate::color::Rgba;
use crate::driver::{Easing, SpringConfig};
use crate::phase::InitialState;
use crate::presentation::TouchVariant;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("button config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Default colors. Injected through configuration rather than read from
/// ambient platform state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub blue: Rgba,
    pub gray: Rgba,
    pub green: Rgba,
    pub red: Rgba,
    pub white: Rgba,
}

impl Palette {
    pub fn ios() -> Self {
        Self {
            blue: Rgba::from_rgb8(0x00, 0x7a, 0xff),
            gray: Rgba::from_rgb8(0xd8, 0xd8, 0xd8),
            green: Rgba::from_rgb8(0x4c, 0xd9, 0x64),
            red: Rgba::from_rgb8(0xff, 0x3b, 0x30),
            white: Rgba::from_rgb8(0xff, 0xff, 0xff),
        }
    }

    pub fn material() -> Self {
        Self {
            blue: Rgba::from_rgb8(0x42, 0x85, 0xf4),
            gray: Rgba::from_rgb8(0xd8, 0xd8, 0xd8),
            green: Rgba::from_rgb8(0x0f, 0x9d, 0x58),
            red: Rgba::from_rgb8(0xdb, 0x44, 0x37),
            white: Rgba::from_rgb8(0xff, 0xff, 0xff),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ios()
    }
}

/// Per-track color overrides, as given by the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorOverrides {
    pub background_color: Option<String>,
    pub foreground_color: Option<String>,
    pub disabled_background_color: Option<String>,
    pub disabled_foreground_color: Option<String>,
    pub success_color: Option<String>,
    pub error_color: Option<String>,
    pub success_icon_color: Option<String>,
    pub error_icon_color: Option<String>,
}

/// Timing of the non-phase animations and the spring used for phase moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    pub spring: SpringConfig,
    /// Duration of the enable/disable move between the resting phases.
    pub disable_duration_ms: u32,
    pub disable_easing: Easing,
    /// Duration of each half of the scale pulse.
    pub pulse_step_ms: u32,
    /// Duration of each of the three shake steps.
    pub shake_step_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            disable_duration_ms: 250,
            disable_easing: Easing::EaseInOut,
            pulse_step_ms: 80,
            shake_step_ms: 40,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
    pub disabled: bool,
    pub initial_state: InitialState,
    /// Press invokes `on_press` immediately and never animates.
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Bounce touch feedback instead of opacity.
    pub bounce: bool,
    pub no_fill: bool,
    pub no_radius: bool,
    pub scale_on_success: bool,
    pub shake_on_error: bool,
    pub expand_on_finish: Option<bool>,
    /// Deprecated spelling of `expand_on_finish`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_expand_on_finish: Option<bool>,
    #[serde(flatten)]
    pub colors: ColorOverrides,
    pub min_width: f32,
    pub max_width: f32,
    pub height: f32,
    pub icon_size: f32,
    pub scale_factor: f32,
    pub shake_offset: f32,
    pub label: Option<String>,
    pub label_icon: Option<String>,
    pub success_icon_name: Option<String>,
    pub error_icon_name: Option<String>,
    pub animation: AnimationConfig,
    pub palette: Palette,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            initial_state: InitialState::None,
            is_static: false,
            bounce: false,
            no_fill: false,
            no_radius: false,
            scale_on_success: false,
            shake_on_error: false,
            expand_on_finish: None,
            should_expand_on_finish: None,
            colors: ColorOverrides::default(),
            min_width: 40.0,
            max_width: 240.0,
            height: 40.0,
            icon_size: 17.0,
            scale_factor: 1.1,
            shake_offset: 10.0,
            label: None,
            label_icon: None,
            success_icon_name: None,
            error_icon_name: None,
            animation: AnimationConfig::default(),
            palette: Palette::default(),
        }
    }
}

/// Override colors after parsing; `None` for absent or unparseable entries.
#[derive(Clone, Debug, Default, PartialEq)]
struct ParsedColors {
    background: Option<Rgba>,
    foreground: Option<Rgba>,
    disabled_background: Option<Rgba>,
    disabled_foreground: Option<Rgba>,
    success: Option<Rgba>,
    error: Option<Rgba>,
    success_icon: Option<Rgba>,
    error_icon: Option<Rgba>,
}

fn parse_color(option: &str, raw: &Option<String>) -> Option<Rgba> {
    let raw = raw.as_deref()?;
    match raw.parse::<Rgba>() {
        Ok(c) => Some(c),
        Err(err) => {
            warn!("ignoring button option '{option}': {err}");
            None
        }
    }
}

fn sanitize_dimension(option: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("ignoring button option '{option}' = {value}; using {fallback}");
        fallback
    }
}

impl ButtonConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether the settled width returns to `max_width`. The current option
    /// name wins over the deprecated one.
    pub fn expands_on_finish(&self) -> bool {
        match (self.expand_on_finish, self.should_expand_on_finish) {
            (Some(v), _) => v,
            (None, Some(v)) => {
                warn!("button option 'shouldExpandOnFinish' is deprecated; use 'expandOnFinish'");
                v
            }
            (None, None) => false,
        }
    }

    pub fn touch_variant(&self) -> TouchVariant {
        if self.bounce {
            TouchVariant::Bounce
        } else {
            TouchVariant::Opacity
        }
    }

    /// Border radius: fully rounded ends unless `no_radius`.
    pub fn border_radius(&self) -> f32 {
        if self.no_radius {
            0.0
        } else {
            self.height() / 2.0
        }
    }

    pub fn height(&self) -> f32 {
        sanitize_dimension("height", self.height, ButtonConfig::default().height)
    }

    pub fn icon_size(&self) -> f32 {
        sanitize_dimension("iconSize", self.icon_size, ButtonConfig::default().icon_size)
    }

    fn parsed_colors(&self) -> ParsedColors {
        let c = &self.colors;
        ParsedColors {
            background: parse_color("backgroundColor", &c.background_color),
            foreground: parse_color("foregroundColor", &c.foreground_color),
            disabled_background: parse_color(
                "disabledBackgroundColor",
                &c.disabled_background_color,
            ),
            disabled_foreground: parse_color(
                "disabledForegroundColor",
                &c.disabled_foreground_color,
            ),
            success: parse_color("successColor", &c.success_color),
            error: parse_color("errorColor", &c.error_color),
            success_icon: parse_color("successIconColor", &c.success_icon_color),
            error_icon: parse_color("errorIconColor", &c.error_icon_color),
        }
    }

    /// Build the keyframe tables. Never fails: every missing or invalid entry
    /// falls back along its chain.
    pub fn resolve_tables(&self) -> PhaseTables {
        let defaults = ButtonConfig::default();
        let p = &self.palette;
        let c = self.parsed_colors();

        let background = c.background.unwrap_or(p.white);
        let foreground = c.foreground.unwrap_or(p.blue);
        let disabled_background = c.disabled_background.unwrap_or(p.gray);
        let disabled_foreground = c.disabled_foreground.unwrap_or(p.white);
        let success = c.success.or(c.foreground).unwrap_or(p.green);
        let error = c.error.or(c.foreground).unwrap_or(p.red);
        let success_icon = c.success_icon.unwrap_or(p.white);
        let error_icon = c.error_icon.unwrap_or(p.white);

        let settled_fill = |outcome_color: Rgba| {
            if self.no_fill {
                background
            } else {
                outcome_color
            }
        };
        let track = |inert: Rgba, rest: Rgba, settled: Rgba| KeyframeTable([inert, rest, rest, settled]);

        let min_width = sanitize_dimension("minWidth", self.min_width, defaults.min_width);
        let max_width = sanitize_dimension("maxWidth", self.max_width, defaults.max_width);
        if min_width > max_width {
            warn!("button minWidth {min_width} exceeds maxWidth {max_width}");
        }
        let settled_width = if self.expands_on_finish() {
            max_width
        } else {
            min_width
        };
        let scale_factor = if self.scale_factor.is_finite() {
            self.scale_factor
        } else {
            warn!("ignoring non-finite button option 'scaleFactor'");
            defaults.scale_factor
        };
        let shake_offset = if self.shake_offset.is_finite() {
            self.shake_offset
        } else {
            warn!("ignoring non-finite button option 'shakeOffset'");
            defaults.shake_offset
        };

        PhaseTables {
            background: OutcomeTracks {
                success: track(disabled_background, background, settled_fill(success)),
                error: track(disabled_background, background, settled_fill(error)),
            },
            foreground: OutcomeTracks {
                success: track(disabled_foreground, foreground, success_icon),
                error: track(disabled_foreground, foreground, error_icon),
            },
            border: OutcomeTracks {
                success: track(disabled_background, foreground, success),
                error: track(disabled_background, foreground, error),
            },
            width: KeyframeTable([max_width, max_width, min_width, settled_width]),
            scale_factor,
            shake_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    #[test]
    fn defaults_follow_palette() {
        let cfg = ButtonConfig::default();
        let t = cfg.resolve_tables();
        let p = Palette::ios();
        assert_eq!(t.background.success.at(Phase::Idle), p.gray);
        assert_eq!(t.background.success.at(Phase::Loading), p.white);
        assert_eq!(t.background.success.at(Phase::Settled), p.green);
        assert_eq!(t.background.error.at(Phase::Settled), p.red);
        assert_eq!(t.foreground.success.at(Phase::Loading), p.blue);
        assert_eq!(t.width.0, [240.0, 240.0, 40.0, 40.0]);
    }

    #[test]
    fn foreground_is_the_general_fallback_for_outcome_colors() {
        let mut cfg = ButtonConfig::default();
        cfg.colors.foreground_color = Some("#112233".into());
        cfg.colors.error_color = Some("#440000".into());
        let t = cfg.resolve_tables();
        assert_eq!(
            t.background.success.at(Phase::Settled),
            Rgba::from_rgb8(0x11, 0x22, 0x33)
        );
        assert_eq!(
            t.background.error.at(Phase::Settled),
            Rgba::from_rgb8(0x44, 0, 0)
        );
    }

    #[test]
    fn invalid_colors_fall_through_the_chain() {
        let mut cfg = ButtonConfig::default();
        cfg.colors.success_color = Some("green-ish".into());
        cfg.colors.foreground_color = Some("#00ff00".into());
        let t = cfg.resolve_tables();
        assert_eq!(
            t.background.success.at(Phase::Settled),
            Rgba::from_rgb8(0, 255, 0)
        );
        cfg.colors.foreground_color = Some("nope".into());
        let t = cfg.resolve_tables();
        assert_eq!(t.background.success.at(Phase::Settled), Palette::ios().green);
        assert_eq!(t.foreground.success.at(Phase::Loading), Palette::ios().blue);
    }

    #[test]
    fn no_fill_keeps_background_when_settled() {
        let cfg = ButtonConfig {
            no_fill: true,
            ..ButtonConfig::default()
        };
        let t = cfg.resolve_tables();
        assert_eq!(t.background.success.at(Phase::Settled), Palette::ios().white);
        // Border still announces the outcome
        assert_eq!(t.border.error.at(Phase::Settled), Palette::ios().red);
    }

    #[test]
    fn deprecated_expand_option_is_honored() {
        let cfg = ButtonConfig::from_json(r#"{ "shouldExpandOnFinish": true }"#).unwrap();
        assert!(cfg.expands_on_finish());
        assert_eq!(cfg.resolve_tables().width.at(Phase::Settled), 240.0);

        let both =
            ButtonConfig::from_json(r#"{ "shouldExpandOnFinish": true, "expandOnFinish": false }"#)
                .unwrap();
        assert!(!both.expands_on_finish());
    }

    #[test]
    fn json_surface_uses_camel_case() {
        let cfg = ButtonConfig::from_json(
            r##"{
                "static": true,
                "initialState": "error",
                "backgroundColor": "#000000",
                "maxWidth": 300,
                "animation": { "disableDurationMs": 100 },
                "palette": { "green": "#0f9d58" }
            }"##,
        )
        .unwrap();
        assert!(cfg.is_static);
        assert_eq!(cfg.initial_state, InitialState::Error);
        assert_eq!(cfg.colors.background_color.as_deref(), Some("#000000"));
        assert_eq!(cfg.max_width, 300.0);
        assert_eq!(cfg.animation.disable_duration_ms, 100);
        assert_eq!(cfg.animation.pulse_step_ms, 80);
        assert_eq!(cfg.palette.green, Palette::material().green);
        assert_eq!(cfg.palette.red, Palette::ios().red);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ButtonConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_dimensions_fall_back() {
        let cfg = ButtonConfig {
            max_width: f32::NAN,
            min_width: -5.0,
            ..ButtonConfig::default()
        };
        assert_eq!(cfg.resolve_tables().width.0, [240.0, 240.0, 40.0, 40.0]);
        assert_eq!(cfg.border_radius(), 20.0);
    }

    #[test]
    fn bad_icon_size_falls_back() {
        for icon_size in [f32::NAN, f32::INFINITY, -1.0] {
            let cfg = ButtonConfig {
                icon_size,
                ..ButtonConfig::default()
            };
            assert_eq!(cfg.icon_size(), 17.0);
        }
        let cfg = ButtonConfig {
            icon_size: 24.0,
            ..ButtonConfig::default()
        };
        assert_eq!(cfg.icon_size(), 24.0);
    }
}
