//! Alpha compositing of a subject over a background
//!
//! Implements the standard "over" operator at pixel level. The compositor
//! never resizes: callers must hand it images of identical dimensions (the
//! remote path resizes generated backgrounds before compositing).

use crate::error::{BgComposeError, Result};
use image::{Rgba, RgbaImage};

/// Service applying the "over" operator per pixel
pub struct Compositor;

impl Compositor {
    /// Paint `subject` over `background`
    ///
    /// Per pixel, with alpha in `[0, 1]`:
    /// `out = subject_alpha * subject + (1 - subject_alpha) * background`,
    /// `out_alpha = subject_alpha + background_alpha * (1 - subject_alpha)`.
    /// An opaque background therefore yields an opaque result.
    ///
    /// # Errors
    ///
    /// Returns a processing error when the two images differ in width or
    /// height; no output is produced in that case.
    pub fn composite(background: &RgbaImage, subject: &RgbaImage) -> Result<RgbaImage> {
        let (bg_width, bg_height) = background.dimensions();
        let (subject_width, subject_height) = subject.dimensions();
        if (bg_width, bg_height) != (subject_width, subject_height) {
            return Err(BgComposeError::processing_stage_error(
                "compositing",
                "dimension mismatch; resize the background to the subject before compositing",
                Some(&format!(
                    "background {}x{}, subject {}x{}",
                    bg_width, bg_height, subject_width, subject_height
                )),
            ));
        }

        let mut output = RgbaImage::new(bg_width, bg_height);
        for (x, y, pixel) in output.enumerate_pixels_mut() {
            *pixel = over(*subject.get_pixel(x, y), *background.get_pixel(x, y));
        }
        Ok(output)
    }
}

/// Standard "over" operator for a single pixel, foreground over background
fn over(foreground: Rgba<u8>, background: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = f32::from(foreground[3]) / 255.0;
    let bg_alpha = f32::from(background[3]) / 255.0;

    let mut output = Rgba([0, 0, 0, 0]);
    for channel in 0..3 {
        output[channel] = (f32::from(foreground[channel]) * fg_alpha
            + f32::from(background[channel]) * (1.0 - fg_alpha))
            .round() as u8;
    }
    output[3] = ((fg_alpha + bg_alpha * (1.0 - fg_alpha)) * 255.0).round() as u8;
    output
}
