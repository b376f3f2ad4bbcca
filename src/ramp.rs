//! Row color math for procedural gradients
//!
//! Each scene category maps to a vertical color ramp: a pure function from
//! the row's position (`ratio` in `[0, 1)`, 0 at the top) to an RGB triple.
//! The pastel ramp interpolates between two endpoint colors drawn once per
//! synthesis, so the endpoints are captured in the shader itself.

use crate::scene::SceneCategory;
use rand::Rng;

/// Per-row color source for a vertical gradient. Channel values are
/// truncated to integers, matching the documented ramp formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowShader {
    SunsetBeach,
    Sunset,
    SkyWater,
    NightSpace,
    Pastel { top: [u8; 3], bottom: [u8; 3] },
}

fn uniform_rgb<R: Rng>(rng: &mut R, lo: u8, hi: u8) -> [u8; 3] {
    [
        rng.gen_range(lo..=hi),
        rng.gen_range(lo..=hi),
        rng.gen_range(lo..=hi),
    ]
}

impl RowShader {
    /// Build the shader for a category, drawing pastel endpoints from `rng`
    pub(crate) fn for_category<R: Rng>(category: SceneCategory, rng: &mut R) -> Self {
        match category {
            SceneCategory::SunsetBeach => Self::SunsetBeach,
            SceneCategory::Sunset => Self::Sunset,
            SceneCategory::SkyWater => Self::SkyWater,
            SceneCategory::NightSpace => Self::NightSpace,
            SceneCategory::Pastel => Self::Pastel {
                top: uniform_rgb(rng, 200, 255),
                bottom: uniform_rgb(rng, 150, 220),
            },
        }
    }

    /// RGB for the row at `ratio`
    pub(crate) fn shade(self, ratio: f32) -> [u8; 3] {
        match self {
            Self::SunsetBeach => [
                (255.0 - ratio * 80.0) as u8,
                (140.0 + ratio * 40.0) as u8,
                (80.0 + ratio * 150.0) as u8,
            ],
            Self::Sunset => [
                (255.0 - ratio * 135.0) as u8,
                (120.0 - ratio * 70.0) as u8,
                (60.0 + ratio * 140.0) as u8,
            ],
            Self::SkyWater => {
                let brightness = 255.0 - ratio * 120.0;
                [
                    (brightness - 100.0).max(100.0) as u8,
                    (brightness - 50.0).max(150.0) as u8,
                    brightness as u8,
                ]
            },
            Self::NightSpace => {
                let brightness = 30.0 + ratio * 20.0;
                [
                    (brightness - 10.0) as u8,
                    (brightness - 5.0) as u8,
                    brightness as u8,
                ]
            },
            Self::Pastel { top, bottom } => {
                let mix = |c: usize| {
                    (f32::from(top[c]) * (1.0 - ratio) + f32::from(bottom[c]) * ratio) as u8
                };
                [mix(0), mix(1), mix(2)]
            },
        }
    }
}
