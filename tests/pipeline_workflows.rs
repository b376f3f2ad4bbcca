//! Integration tests for the complete background replacement workflows
//!
//! Mock collaborators stand in for the external subject extractor and the
//! remote generator, so these tests exercise the real classification,
//! synthesis, and compositing paths end to end without network access.

use async_trait::async_trait;
use bgcompose::{
    BackgroundPipeline, BackgroundProvider, BackgroundRequest, BackgroundSource, BgComposeError,
    OutputFormat, PipelineConfig, Result, SceneCategory, SubjectExtractor,
};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::time::Duration;

/// Extractor that keeps a centered opaque disk of the input and makes
/// everything else fully transparent
struct DiskExtractor;

#[async_trait]
impl SubjectExtractor for DiskExtractor {
    async fn extract(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let source = image.to_rgba8();
        let (width, height) = source.dimensions();
        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let radius = width.min(height) as f32 / 4.0;

        let mut subject = RgbaImage::new(width, height);
        for (x, y, pixel) in subject.enumerate_pixels_mut() {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let inside = (dx * dx + dy * dy).sqrt() <= radius;
            let src = source.get_pixel(x, y);
            *pixel = if inside {
                Rgba([src[0], src[1], src[2], 255])
            } else {
                Rgba([0, 0, 0, 0])
            };
        }
        Ok(subject)
    }
}

/// Extractor simulating a dead segmentation backend
struct FailingExtractor;

#[async_trait]
impl SubjectExtractor for FailingExtractor {
    async fn extract(&self, _image: &DynamicImage) -> Result<RgbaImage> {
        Err(BgComposeError::processing(
            "segmentation backend unavailable",
        ))
    }
}

/// Remote provider that always reports a server-side failure
struct FailingProvider;

#[async_trait]
impl BackgroundProvider for FailingProvider {
    async fn generate(&self, _request: &BackgroundRequest) -> Result<RgbaImage> {
        Err(BgComposeError::remote_service(
            "Remote generator returned status 503",
        ))
    }
}

/// Remote provider returning a solid color at the requested dimensions
struct SolidProvider(Rgba<u8>);

#[async_trait]
impl BackgroundProvider for SolidProvider {
    async fn generate(&self, request: &BackgroundRequest) -> Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(request.width, request.height, self.0))
    }
}

/// Remote provider that never answers within a reasonable timeout
struct SlowProvider {
    delay: Duration,
}

#[async_trait]
impl BackgroundProvider for SlowProvider {
    async fn generate(&self, request: &BackgroundRequest) -> Result<RgbaImage> {
        tokio::time::sleep(self.delay).await;
        Ok(RgbaImage::from_pixel(
            request.width,
            request.height,
            Rgba([1, 2, 3, 255]),
        ))
    }
}

/// Encode a small RGB test photo as PNG bytes
fn test_photo_png(width: u32, height: u32) -> Vec<u8> {
    let mut image = RgbImage::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let intensity = ((x + y) % 100) as u8;
        *pixel = Rgb([intensity, 128, 255 - intensity]);
    }
    encode_png_rgb(&image)
}

fn encode_png_rgb(image: &RgbImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    buffer
}

fn encode_png_rgba(image: &RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    buffer
}

fn seeded_config() -> PipelineConfig {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    PipelineConfig::builder()
        .synthesis_seed(9)
        .remote_timeout(Duration::from_secs(1))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_forced_remote_failure_falls_back_to_scene_gradient() {
    let pipeline = BackgroundPipeline::with_provider(
        seeded_config(),
        Box::new(DiskExtractor),
        Some(Box::new(FailingProvider)),
    );

    let input = test_photo_png(48, 32);
    let result = pipeline
        .generate_ai_background(&input, "sunset over ocean")
        .await
        .unwrap();

    assert_eq!(result.dimensions(), (48, 32));
    assert_eq!(
        result.background_source,
        BackgroundSource::Procedural(SceneCategory::SunsetBeach)
    );

    // The output must be a decodable PNG of the input dimensions
    let png = result.to_png_bytes().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (48, 32));

    // The top-left corner lies outside the subject disk, so it shows the
    // gradient's first row: the sunset-beach ramp at ratio 0.
    assert_eq!(decoded.get_pixel(0, 0), &Rgba([255, 140, 80, 255]));
    assert!(decoded.pixels().all(|pixel| pixel[3] == 255));
}

#[tokio::test]
async fn test_remote_success_uses_remote_background() {
    let color = Rgba([10, 200, 30, 255]);
    let pipeline = BackgroundPipeline::with_provider(
        seeded_config(),
        Box::new(DiskExtractor),
        Some(Box::new(SolidProvider(color))),
    );

    let input = test_photo_png(32, 32);
    let result = pipeline
        .generate_ai_background(&input, "sunset over ocean")
        .await
        .unwrap();

    assert_eq!(result.background_source, BackgroundSource::Remote);
    assert_eq!(result.image.get_pixel(0, 0), &color);
}

#[tokio::test(start_paused = true)]
async fn test_remote_timeout_selects_fallback_not_error() {
    let pipeline = BackgroundPipeline::with_provider(
        seeded_config(),
        Box::new(DiskExtractor),
        Some(Box::new(SlowProvider {
            delay: Duration::from_secs(120),
        })),
    );

    let input = test_photo_png(24, 24);
    let result = pipeline
        .generate_ai_background(&input, "night galaxy")
        .await
        .unwrap();

    assert!(matches!(
        result.background_source,
        BackgroundSource::Procedural(SceneCategory::NightSpace)
    ));
}

#[tokio::test]
async fn test_without_provider_synthesis_runs_directly() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let input = test_photo_png(16, 16);
    let result = pipeline.generate_ai_background(&input, "").await.unwrap();

    assert_eq!(
        result.background_source,
        BackgroundSource::Procedural(SceneCategory::Pastel)
    );
}

#[tokio::test]
async fn test_empty_image_is_a_client_error() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let err = pipeline
        .generate_ai_background(&[], "sunset")
        .await
        .unwrap_err();
    assert!(err.is_client_error());

    let err = pipeline
        .blur_background(&[], &test_photo_png(8, 8), 5)
        .await
        .unwrap_err();
    assert!(err.is_client_error());
}

#[tokio::test]
async fn test_undecodable_image_is_a_processing_error() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let err = pipeline
        .generate_ai_background(b"not an image", "sunset")
        .await
        .unwrap_err();
    assert!(matches!(err, BgComposeError::Processing(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_extraction_failure_surfaces_as_processing_error() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(FailingExtractor), None);

    let err = pipeline
        .generate_ai_background(&test_photo_png(8, 8), "sunset")
        .await
        .unwrap_err();
    assert!(matches!(err, BgComposeError::Processing(_)));
    assert!(err.to_string().contains("segmentation backend unavailable"));
}

#[tokio::test]
async fn test_blur_intensity_zero_composites_over_unblurred_original() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let original = RgbImage::from_pixel(20, 20, Rgb([200, 30, 40]));
    let transparent_subject = RgbaImage::new(20, 20);

    let result = pipeline
        .blur_background(
            &encode_png_rgb(&original),
            &encode_png_rgba(&transparent_subject),
            0,
        )
        .await
        .unwrap();

    assert_eq!(result.background_source, BackgroundSource::Blurred);
    assert_eq!(result.dimensions(), (20, 20));
    // Radius 0 leaves the original untouched; a fully transparent subject
    // leaves the background untouched.
    assert!(result
        .image
        .pixels()
        .all(|pixel| pixel == &Rgba([200, 30, 40, 255])));
}

#[tokio::test]
async fn test_blur_keeps_subject_sharp_over_blurred_background() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    // High-contrast checkerboard background so blur visibly changes it
    let mut original = RgbImage::new(24, 24);
    for (x, y, pixel) in original.enumerate_pixels_mut() {
        *pixel = if (x + y) % 2 == 0 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        };
    }

    // Opaque magenta subject pixel in the center, transparent elsewhere
    let mut subject = RgbaImage::new(24, 24);
    subject.put_pixel(12, 12, Rgba([255, 0, 255, 255]));

    let result = pipeline
        .blur_background(&encode_png_rgb(&original), &encode_png_rgba(&subject), 3)
        .await
        .unwrap();

    // Subject pixel survives compositing untouched
    assert_eq!(result.image.get_pixel(12, 12), &Rgba([255, 0, 255, 255]));
    // The blurred checkerboard averages toward gray away from the subject
    let corner = result.image.get_pixel(2, 2);
    assert!(corner[0] > 40 && corner[0] < 215, "expected blur averaging");
}

#[tokio::test]
async fn test_blur_flow_rejects_mismatched_subject_dimensions() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let err = pipeline
        .blur_background(&test_photo_png(20, 20), &test_photo_png(10, 10), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, BgComposeError::Processing(_)));
}

#[tokio::test]
async fn test_remove_background_returns_transparent_subject() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let result = pipeline
        .remove_background(&test_photo_png(40, 40))
        .await
        .unwrap();

    assert_eq!(result.background_source, BackgroundSource::None);
    assert_eq!(result.dimensions(), (40, 40));
    // Corner transparent, center opaque
    assert_eq!(result.image.get_pixel(0, 0)[3], 0);
    assert_eq!(result.image.get_pixel(20, 20)[3], 255);
}

#[tokio::test]
async fn test_byte_level_boundary_operations_return_png() {
    let pipeline = BackgroundPipeline::with_provider(
        seeded_config(),
        Box::new(DiskExtractor),
        Some(Box::new(FailingProvider)),
    );

    let input = test_photo_png(30, 20);
    let png = bgcompose::generate_ai_background_from_bytes(&pipeline, &input, "starry night sky")
        .await
        .unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.width(), 30);
    assert_eq!(decoded.height(), 20);

    let removed = bgcompose::remove_background_from_bytes(&pipeline, &input)
        .await
        .unwrap();
    assert!(image::load_from_memory(&removed).is_ok());

    let blurred = bgcompose::blur_background_from_bytes(&pipeline, &input, &removed, 4)
        .await
        .unwrap();
    assert!(image::load_from_memory(&blurred).is_ok());
}

#[tokio::test]
async fn test_configured_output_format_is_honored_at_encode_time() {
    let config = PipelineConfig::builder()
        .synthesis_seed(9)
        .output_format(OutputFormat::Jpeg)
        .jpeg_quality(80)
        .build()
        .unwrap();
    let pipeline = BackgroundPipeline::with_provider(config, Box::new(DiskExtractor), None);

    let bytes =
        bgcompose::generate_ai_background_from_bytes(&pipeline, &test_photo_png(16, 16), "dawn")
            .await
            .unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb8);
}

#[tokio::test]
async fn test_stage_timings_are_recorded() {
    let pipeline =
        BackgroundPipeline::with_provider(seeded_config(), Box::new(DiskExtractor), None);

    let result = pipeline
        .generate_ai_background(&test_photo_png(16, 16), "blue sea")
        .await
        .unwrap();

    assert!(result.timings.decode_ms.is_some());
    assert!(result.timings.extract_ms.is_some());
    assert!(result.timings.background_ms.is_some());
    assert!(result.timings.composite_ms.is_some());
}
