//! Concentration → colour mapping.

use palette::Srgb;

use crate::utils::LinearFunction;

/// A concentration paired with the colour shown at that concentration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorPoint {
    pub concentration: f64,
    pub color: Srgb<u8>,
}

impl ColorPoint {
    pub fn new(concentration: f64, rgb: [u8; 3]) -> Self {
        Self {
            concentration,
            color: Srgb::new(rgb[0], rgb[1], rgb[2]),
        }
    }
}

/// Three ordered control points (min < mid < max). Each channel is
/// interpolated linearly between the two bracketing points; queries past
/// either end clamp to the boundary colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScheme {
    pub min: ColorPoint,
    pub mid: ColorPoint,
    pub max: ColorPoint,
}

impl ColorScheme {
    pub fn new(min: ColorPoint, mid: ColorPoint, max: ColorPoint) -> Self {
        debug_assert!(
            min.concentration < mid.concentration && mid.concentration < max.concentration,
            "colour control points must be strictly increasing"
        );
        Self { min, mid, max }
    }

    pub fn color_at(&self, concentration: f64) -> Srgb<u8> {
        // NaN falls through to the minimum colour as well
        if !(concentration > self.min.concentration) {
            self.min.color
        } else if concentration >= self.max.concentration {
            self.max.color
        } else if concentration <= self.mid.concentration {
            interpolate(self.min, self.mid, concentration)
        } else {
            interpolate(self.mid, self.max, concentration)
        }
    }
}

fn interpolate(lower: ColorPoint, upper: ColorPoint, concentration: f64) -> Srgb<u8> {
    let from: Srgb<f32> = lower.color.into_format();
    let to: Srgb<f32> = upper.color.into_format();
    let channel = |a: f32, b: f32| {
        LinearFunction::new(lower.concentration, upper.concentration, a as f64, b as f64)
            .evaluate(concentration) as f32
    };
    Srgb::new(
        channel(from.red, to.red),
        channel(from.green, to.green),
        channel(from.blue, to.blue),
    )
    .into_format()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> ColorScheme {
        ColorScheme::new(
            ColorPoint::new(0.0, [255, 255, 255]),
            ColorPoint::new(1.0, [255, 127, 0]),
            ColorPoint::new(3.0, [101, 1, 0]),
        )
    }

    #[test]
    fn control_points_are_exact() {
        let s = scheme();
        assert_eq!(s.color_at(0.0), s.min.color);
        assert_eq!(s.color_at(1.0), s.mid.color);
        assert_eq!(s.color_at(3.0), s.max.color);
    }

    #[test]
    fn outside_range_clamps_to_boundary_colors() {
        let s = scheme();
        assert_eq!(s.color_at(-5.0), s.min.color);
        assert_eq!(s.color_at(f64::NAN), s.min.color);
        assert_eq!(s.color_at(100.0), s.max.color);
    }

    #[test]
    fn channels_interpolate_independently() {
        let s = scheme();
        let c = s.color_at(2.0);
        // halfway between mid and max
        assert_eq!(c.red, 178);
        assert_eq!(c.green, 64);
        assert_eq!(c.blue, 0);
    }

    #[test]
    fn green_channel_is_monotonic_across_range() {
        let s = scheme();
        let mut last = u8::MAX;
        for i in 0..=40 {
            let g = s.color_at(i as f64 * 0.1).green;
            assert!(g <= last);
            last = g;
        }
    }
}
