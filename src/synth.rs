//! Procedural background synthesis
//!
//! Renders full-frame gradient backgrounds for a scene category: a fresh
//! opaque canvas filled row by row from the category's color ramp, with star
//! speckling overlaid for night scenes. Synthesis never fails for valid
//! positive dimensions; a zero-sized canvas simply renders no rows.

use crate::ramp::RowShader;
use crate::scene::SceneCategory;
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of point-lights speckled over a night-space background
const STAR_COUNT: u32 = 100;

/// Star alpha is drawn uniformly from this range before blending
const STAR_ALPHA_MIN: u8 = 150;

/// Offsets of the ~2px filled disk drawn per star
const STAR_DISK: &[(u32, u32)] = &[(0, 0), (1, 0), (0, 1), (1, 1)];

/// Procedural background renderer
///
/// Owns its random source: star placement and pastel endpoints are drawn from
/// it per synthesis. Entropy-seeded by default, so successive night renders
/// are visually distinct; use [`BackgroundSynthesizer::with_seed`] when
/// reproducibility matters (tests, golden images).
pub struct BackgroundSynthesizer {
    rng: StdRng,
}

impl BackgroundSynthesizer {
    /// Create a synthesizer with an entropy-seeded random source
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a synthesizer with a fixed seed for reproducible output
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Render an opaque full-frame background for the category
    ///
    /// Every row `y` is filled with the ramp color at `ratio = y / height`;
    /// all pixels carry alpha 255. Night scenes get [`STAR_COUNT`] white
    /// point-lights blended over the gradient afterwards.
    pub fn synthesize(
        &mut self,
        category: SceneCategory,
        width: u32,
        height: u32,
    ) -> RgbaImage {
        log::debug!(
            "Synthesizing {} background at {}x{}",
            category,
            width,
            height
        );

        let shader = RowShader::for_category(category, &mut self.rng);
        let mut canvas = RgbaImage::new(width, height);
        for y in 0..height {
            let ratio = y as f32 / height as f32;
            let [r, g, b] = shader.shade(ratio);
            for x in 0..width {
                canvas.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }

        if category == SceneCategory::NightSpace {
            self.speckle_stars(&mut canvas);
        }

        canvas
    }

    /// Overlay random white point-lights, keeping the canvas fully opaque
    fn speckle_stars(&mut self, canvas: &mut RgbaImage) {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        for _ in 0..STAR_COUNT {
            let star_x = self.rng.gen_range(0..width);
            let star_y = self.rng.gen_range(0..height);
            let alpha = self.rng.gen_range(STAR_ALPHA_MIN..=u8::MAX);
            let weight = f32::from(alpha) / 255.0;

            for &(dx, dy) in STAR_DISK {
                let x = star_x + dx;
                let y = star_y + dy;
                if x >= width || y >= height {
                    continue;
                }
                let pixel = canvas.get_pixel_mut(x, y);
                for channel in 0..3 {
                    pixel[channel] = (255.0 * weight
                        + f32::from(pixel[channel]) * (1.0 - weight))
                        .round() as u8;
                }
            }
        }
    }
}

impl Default for BackgroundSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}
