//! InterpolationBank: derives presentation signals from the primary and micro
//! scalars.
//!
//! Every signal is a pure function of the two scalar values and the tables
//! captured at construction. Success and error tracks are sampled together on
//! every call; the controller picks one by `is_error` when presenting.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::interp::{Interpolation, Lerp};
use crate::phase::Phase;

/// One value per phase index.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframeTable<T>(pub [T; 4]);

impl<T: Lerp> KeyframeTable<T> {
    #[inline]
    pub fn at(&self, phase: Phase) -> T {
        self.0[phase.index()]
    }

    /// Phase indices `0..=3` mapped onto the table.
    pub fn interpolation(&self) -> Interpolation<T> {
        Interpolation::indexed(self.0)
    }
}

/// Parallel keyframe tracks for the two outcomes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeTracks<T> {
    pub success: KeyframeTable<T>,
    pub error: KeyframeTable<T>,
}

/// Tables the bank is built from; resolved once from configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTables {
    pub background: OutcomeTracks<Rgba>,
    pub foreground: OutcomeTracks<Rgba>,
    pub border: OutcomeTracks<Rgba>,
    pub width: KeyframeTable<f32>,
    /// Peak of the scale pulse (micro value 1).
    pub scale_factor: f32,
    /// Horizontal extreme of the shake (micro values 1 and 2).
    pub shake_offset: f32,
}

/// Signals sampled at one pair of scalar values.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub success_background: Rgba,
    pub error_background: Rgba,
    pub success_foreground: Rgba,
    pub error_foreground: Rgba,
    pub success_border: Rgba,
    pub error_border: Rgba,
    pub width: f32,
    pub scale: f32,
    pub shake: f32,
}

impl Signals {
    pub fn background(&self, is_error: bool) -> Rgba {
        if is_error {
            self.error_background
        } else {
            self.success_background
        }
    }

    pub fn foreground(&self, is_error: bool) -> Rgba {
        if is_error {
            self.error_foreground
        } else {
            self.success_foreground
        }
    }

    pub fn border(&self, is_error: bool) -> Rgba {
        if is_error {
            self.error_border
        } else {
            self.success_border
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Tracks<T> {
    success: Interpolation<T>,
    error: Interpolation<T>,
}

impl<T: Lerp> Tracks<T> {
    fn new(tracks: &OutcomeTracks<T>) -> Self {
        Self {
            success: tracks.success.interpolation(),
            error: tracks.error.interpolation(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterpolationBank {
    tables: PhaseTables,
    background: Tracks<Rgba>,
    foreground: Tracks<Rgba>,
    border: Tracks<Rgba>,
    width: Interpolation<f32>,
    scale: Interpolation<f32>,
    shake: Interpolation<f32>,
}

impl InterpolationBank {
    pub fn new(tables: PhaseTables) -> Self {
        Self {
            background: Tracks::new(&tables.background),
            foreground: Tracks::new(&tables.foreground),
            border: Tracks::new(&tables.border),
            width: tables.width.interpolation(),
            scale: Interpolation::indexed([1.0, tables.scale_factor]),
            shake: Interpolation::indexed([0.0, tables.shake_offset, -tables.shake_offset]),
            tables,
        }
    }

    pub fn tables(&self) -> &PhaseTables {
        &self.tables
    }

    /// Micro `[0, 1]` → `[1, scale_factor]`.
    pub fn scale(&self, micro: f32) -> f32 {
        self.scale.sample(micro)
    }

    /// Micro `[0, 1, 2]` → `[0, +offset, -offset]`.
    pub fn shake(&self, micro: f32) -> f32 {
        self.shake.sample(micro)
    }

    pub fn sample(&self, primary: f32, micro: f32) -> Signals {
        Signals {
            success_background: self.background.success.sample(primary),
            error_background: self.background.error.sample(primary),
            success_foreground: self.foreground.success.sample(primary),
            error_foreground: self.foreground.error.sample(primary),
            success_border: self.border.success.sample(primary),
            error_border: self.border.error.sample(primary),
            width: self.width.sample(primary),
            scale: self.scale(micro),
            shake: self.shake(micro),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(v: u8) -> Rgba {
        Rgba::from_rgb8(v, v, v)
    }

    fn tables() -> PhaseTables {
        let bg = OutcomeTracks {
            success: KeyframeTable([gray(10), gray(20), gray(30), Rgba::from_rgb8(0, 200, 0)]),
            error: KeyframeTable([gray(10), gray(20), gray(30), Rgba::from_rgb8(200, 0, 0)]),
        };
        PhaseTables {
            background: bg,
            foreground: bg,
            border: bg,
            width: KeyframeTable([240.0, 240.0, 40.0, 40.0]),
            scale_factor: 1.1,
            shake_offset: 10.0,
        }
    }

    #[test]
    fn exact_at_every_phase_index() {
        let bank = InterpolationBank::new(tables());
        for phase in Phase::ALL {
            let v = phase.rest_value();
            assert_eq!(
                bank.sample(v, 0.0).background(false),
                bank.tables().background.success.at(phase)
            );
            assert_eq!(
                bank.sample(v, 0.0).background(true),
                bank.tables().background.error.at(phase)
            );
            assert_eq!(bank.sample(v, 0.0).width, bank.tables().width.at(phase));
        }
    }

    #[test]
    fn width_interpolates_and_extends_on_overshoot() {
        let bank = InterpolationBank::new(tables());
        assert_eq!(bank.sample(1.5, 0.0).width, 140.0);
        // Spring overshoot below Loading keeps the flat segment
        assert!((bank.sample(-0.2, 0.0).width - 240.0).abs() < 1e-3);
        // Overshoot past Settled extends the last (flat) segment
        assert!((bank.sample(3.1, 0.0).width - 40.0).abs() < 1e-3);
    }

    #[test]
    fn micro_ranges() {
        let bank = InterpolationBank::new(tables());
        assert_eq!(bank.scale(0.0), 1.0);
        assert_eq!(bank.scale(1.0), 1.1);
        assert_eq!(bank.shake(0.0), 0.0);
        assert_eq!(bank.shake(1.0), 10.0);
        assert_eq!(bank.shake(2.0), -10.0);
        assert_eq!(bank.shake(1.5), 0.0);
    }

    #[test]
    fn both_tracks_sampled_together() {
        let bank = InterpolationBank::new(tables());
        let s = bank.sample(3.0, 0.0);
        assert_eq!(s.background(false), Rgba::from_rgb8(0, 200, 0));
        assert_eq!(s.background(true), Rgba::from_rgb8(200, 0, 0));
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.shake, 0.0);
    }
}
