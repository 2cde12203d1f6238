//! Range interpolation: maps an input scalar range onto an output range of
//! numbers or colors.
//!
//! Sampling is piecewise linear between the two stops that bracket the input.
//! Inputs outside the range extend the first/last segment, which keeps spring
//! overshoot visible on numeric outputs (color channels clamp on their own).

pub mod functions;

use crate::color::Rgba;
use functions::lerp_f32_exact;

/// Values that can be blended linearly.
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        lerp_f32_exact(self, other, t)
    }
}

impl Lerp for Rgba {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Rgba::lerp(self, other, t)
    }
}

/// Rejects ranges with fewer than two stops at compile time.
struct MinStops<const N: usize>;

impl<const N: usize> MinStops<N> {
    const CHECK: () = assert!(N >= 2, "an interpolation needs at least two stops");
}

/// Input range `0, 1, .., n-1` mapped onto an output range.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation<T> {
    input: Vec<f32>,
    output: Vec<T>,
}

impl<T: Lerp> Interpolation<T> {
    /// Stops at consecutive integer inputs, one per output value.
    pub fn indexed<const N: usize>(output: [T; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = MinStops::<N>::CHECK;
        Self {
            input: (0..N).map(|i| i as f32).collect(),
            output: output.to_vec(),
        }
    }

    /// Sample at `v`. Exact at every stop; NaN maps to the first output.
    pub fn sample(&self, v: f32) -> T {
        if v.is_nan() {
            return self.output[0];
        }
        let last = self.input.len() - 1;
        // Segment index in [0, last - 1]
        let i = self.input[1..last].iter().take_while(|x| **x <= v).count();
        let (x0, x1) = (self.input[i], self.input[i + 1]);
        let t = (v - x0) / (x1 - x0);
        self.output[i].lerp(self.output[i + 1], t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piecewise_and_extended() {
        let i = Interpolation::indexed([0.0f32, 10.0, -10.0]);
        assert_eq!(i.sample(0.0), 0.0);
        assert_eq!(i.sample(1.0), 10.0);
        assert_eq!(i.sample(2.0), -10.0);
        assert_eq!(i.sample(0.5), 5.0);
        assert_eq!(i.sample(1.5), 0.0);
        // Extends the outer segments
        assert_eq!(i.sample(-1.0), -10.0);
        assert_eq!(i.sample(2.5), -20.0);
        assert_eq!(i.sample(f32::NAN), 0.0);
    }

    #[test]
    fn two_stops_form_a_single_segment() {
        let i = Interpolation::indexed([1.0f32, 1.1]);
        assert_eq!(i.sample(0.0), 1.0);
        assert_eq!(i.sample(1.0), 1.1);
        assert!((i.sample(0.5) - 1.05).abs() < 1e-6);
    }

    #[test]
    fn colors_clamp_when_extended() {
        let black = Rgba::from_rgb8(0, 0, 0);
        let white = Rgba::from_rgb8(255, 255, 255);
        let i = Interpolation::indexed([black, white]);
        assert_eq!(i.sample(1.0), white);
        assert_eq!(i.sample(2.0), white);
        assert_eq!(i.sample(-1.0), black);
    }
}
