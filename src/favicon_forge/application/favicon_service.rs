use super::error::ApplicationError;
use crate::domain::canvas::{CompositeSpec, CornerCheck, GlyphSpec, PadSpec};
use crate::domain::asset::{AssetReport, EncodedImage};
use crate::domain::image_processor_trait::ImageProcessor;
use crate::infrastructure::file_storage::LocalFileStorage;
use crate::infrastructure::source_loader::SourceLoader;
use std::path::Path;
use std::sync::Arc;

pub struct FaviconService {
    image_processor: Arc<dyn ImageProcessor + Send + Sync>,
    source_loader: SourceLoader,
    file_storage: LocalFileStorage,
}

impl FaviconService {
    pub fn new(image_processor: Arc<dyn ImageProcessor + Send + Sync>) -> Self {
        Self {
            image_processor,
            source_loader: SourceLoader::new(),
            file_storage: LocalFileStorage::new(),
        }
    }

    pub async fn compose(
        &self,
        source: &str,
        spec: &CompositeSpec,
        dest: &Path,
    ) -> Result<AssetReport, ApplicationError> {
        log::info!(
            "composing {} onto a {}px rounded square (radius {}, fill {:.0}%, trim {})",
            source,
            spec.canvas.size,
            spec.canvas.corner_radius,
            spec.fill_ratio * 100.0,
            spec.trim
        );
        let image_data = self.source_loader.load(source).await?;
        let encoded = self.image_processor.compose_rounded(&image_data, spec)?;
        self.store_and_verify(encoded, dest, spec.canvas.size, Some(spec.canvas.corner_check()))
            .await
    }

    pub async fn pad(
        &self,
        source: &str,
        spec: &PadSpec,
        dest: &Path,
    ) -> Result<AssetReport, ApplicationError> {
        log::info!(
            "padding {} by {:.0}% onto a transparent {}px square",
            source,
            spec.padding_ratio * 100.0,
            spec.output_size
        );
        let image_data = self.source_loader.load(source).await?;
        let encoded = self.image_processor.pad_square(&image_data, spec)?;
        self.store_and_verify(encoded, dest, spec.output_size, None).await
    }

    pub async fn glyph(&self, spec: &GlyphSpec, dest: &Path) -> Result<AssetReport, ApplicationError> {
        match spec.tilt {
            Some(tilt) => log::info!("drawing tilted letterform (shear {})", tilt),
            None => log::info!("drawing upright letterform"),
        }
        let encoded = self.image_processor.render_glyph(spec)?;
        self.store_and_verify(encoded, dest, spec.canvas.size, Some(spec.canvas.corner_check()))
            .await
    }

    /// Reads `dest` back and checks it is a non-empty `expected_size` square image,
    /// with rounded corners when a positive radius is given.
    pub async fn verify(
        &self,
        dest: &Path,
        expected_size: u32,
        corners: Option<CornerCheck>,
    ) -> Result<AssetReport, ApplicationError> {
        let fail = |reason: String| ApplicationError::VerificationFailed {
            path: dest.display().to_string(),
            reason,
        };

        let data = self.file_storage.read(dest).await?;
        if data.is_empty() {
            return Err(fail("file is empty".to_string()));
        }

        let report = self
            .image_processor
            .inspect(&data, corners)
            .map_err(|e| fail(format!("not a decodable image: {}", e)))?;

        if (report.width, report.height) != (expected_size, expected_size) {
            return Err(fail(format!(
                "expected {}x{}, found {}x{}",
                expected_size, expected_size, report.width, report.height
            )));
        }
        if report.rounded_corners == Some(false) {
            return Err(fail(format!(
                "corners do not match a radius of {}",
                corners.map(|check| check.radius).unwrap_or_default()
            )));
        }

        log::debug!("verified {}: {:?}", dest.display(), report);
        Ok(report)
    }

    async fn store_and_verify(
        &self,
        encoded: EncodedImage,
        dest: &Path,
        expected_size: u32,
        corners: Option<CornerCheck>,
    ) -> Result<AssetReport, ApplicationError> {
        log::debug!(
            "encoded {:?} {}x{} ({} bytes)",
            encoded.format,
            encoded.width,
            encoded.height,
            encoded.data.len()
        );
        self.file_storage.save(dest, &encoded.data).await?;
        let report = self.verify(dest, expected_size, corners).await?;
        log::info!(
            "saved {} ({}x{}, {} bytes)",
            dest.display(),
            report.width,
            report.height,
            report.byte_len
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::canvas::CanvasSpec;
    use crate::domain::color::Color;
    use crate::domain::image_processor_trait::MockImageProcessor;
    use crate::infrastructure::error::InfrastructureError;
    use crate::infrastructure::image_processor::DefaultImageProcessor;
    use image::ImageFormat;

    fn composite_spec() -> CompositeSpec {
        let canvas = CanvasSpec::new(512, 64, Color::WHITE).unwrap();
        CompositeSpec::new(canvas, 0.75, false).unwrap()
    }

    fn filled(radius: u32) -> Option<CornerCheck> {
        Some(CornerCheck {
            radius,
            filled_edges: true,
        })
    }

    fn report(size: u32, byte_len: usize, rounded: Option<bool>) -> AssetReport {
        AssetReport {
            width: size,
            height: size,
            byte_len,
            rounded_corners: rounded,
        }
    }

    #[tokio::test]
    async fn test_compose_writes_and_verifies_output() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("public").join("favicon.png");

        let mut processor = MockImageProcessor::new();
        processor
            .expect_compose_rounded()
            .withf(|source, spec| source.to_vec() == vec![1u8, 2, 3] && spec.fill_ratio == 0.75)
            .times(1)
            .returning(|_, _| Ok(EncodedImage::new(vec![9, 9, 9], 512, 512, ImageFormat::Png)));
        processor
            .expect_inspect()
            .withf(|data, corners| data.to_vec() == vec![9u8, 9, 9] && *corners == filled(64))
            .times(1)
            .returning(|data, _| Ok(report(512, data.len(), Some(true))));

        let service = FaviconService::new(Arc::new(processor));
        let result = service
            .compose("data:image/png;base64,AQID", &composite_spec(), &dest)
            .await
            .unwrap();

        assert_eq!(result, report(512, 3, Some(true)));
        assert_eq!(std::fs::read(&dest).unwrap(), vec![9, 9, 9]);
    }

    #[tokio::test]
    async fn test_compose_propagates_processor_failure() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("favicon.png");

        let mut processor = MockImageProcessor::new();
        processor
            .expect_compose_rounded()
            .returning(|_, _| Err(InfrastructureError::ImageProcessingError("mock processing error".to_string())));
        processor.expect_inspect().never();

        let service = FaviconService::new(Arc::new(processor));
        let result = service
            .compose("data:image/png;base64,AQID", &composite_spec(), &dest)
            .await;

        match result {
            Err(ApplicationError::InfrastructureError(InfrastructureError::ImageProcessingError(msg))) => {
                assert_eq!(msg, "mock processing error")
            }
            other => panic!("expected ImageProcessingError, got {:?}", other),
        }
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_compose_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut processor = MockImageProcessor::new();
        processor.expect_compose_rounded().never();

        let service = FaviconService::new(Arc::new(processor));
        let missing = dir.path().join("nope.png");
        let result = service
            .compose(missing.to_str().unwrap(), &composite_spec(), &dir.path().join("out.png"))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::InfrastructureError(InfrastructureError::SourceNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_verify_rejects_wrong_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("favicon.png");
        std::fs::write(&dest, [1, 2, 3]).unwrap();

        let mut processor = MockImageProcessor::new();
        processor
            .expect_inspect()
            .returning(|data, _| Ok(report(256, data.len(), None)));

        let service = FaviconService::new(Arc::new(processor));
        match service.verify(&dest, 512, None).await {
            Err(ApplicationError::VerificationFailed { reason, .. }) => {
                assert_eq!(reason, "expected 512x512, found 256x256")
            }
            other => panic!("expected VerificationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_verify_rejects_square_corners() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("favicon.png");
        std::fs::write(&dest, [1, 2, 3]).unwrap();

        let mut processor = MockImageProcessor::new();
        processor
            .expect_inspect()
            .returning(|data, _| Ok(report(512, data.len(), Some(false))));

        let service = FaviconService::new(Arc::new(processor));
        assert!(matches!(
            service.verify(&dest, 512, filled(80)).await,
            Err(ApplicationError::VerificationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_verify_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("favicon.png");
        std::fs::write(&dest, b"").unwrap();

        let mut processor = MockImageProcessor::new();
        processor.expect_inspect().never();

        let service = FaviconService::new(Arc::new(processor));
        match service.verify(&dest, 512, None).await {
            Err(ApplicationError::VerificationFailed { reason, .. }) => assert_eq!(reason, "file is empty"),
            other => panic!("expected VerificationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transparent_background_is_verified_without_filled_edges() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("favicon.png");

        let mut processor = MockImageProcessor::new();
        processor
            .expect_compose_rounded()
            .returning(|_, _| Ok(EncodedImage::new(vec![7], 512, 512, ImageFormat::Png)));
        processor
            .expect_inspect()
            .withf(|_, corners| {
                *corners
                    == Some(CornerCheck {
                        radius: 64,
                        filled_edges: false,
                    })
            })
            .times(1)
            .returning(|data, _| Ok(report(512, data.len(), Some(true))));

        let canvas = CanvasSpec::new(512, 64, Color::TRANSPARENT).unwrap();
        let spec = CompositeSpec::new(canvas, 0.75, false).unwrap();
        let service = FaviconService::new(Arc::new(processor));
        let result = service.compose("data:image/png;base64,AQID", &spec, &dest).await;

        assert_eq!(result.unwrap(), report(512, 1, Some(true)));
    }

    #[tokio::test]
    async fn test_transparent_compose_with_real_processor() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("logo.png");
        image::RgbaImage::from_pixel(100, 100, image::Rgba([0, 0, 255, 255]))
            .save(&source_path)
            .unwrap();
        let canvas = CanvasSpec::new(512, 64, Color::TRANSPARENT).unwrap();
        let spec = CompositeSpec::new(canvas, 0.75, false).unwrap();
        let dest = dir.path().join("favicon.png");

        let service = FaviconService::new(Arc::new(DefaultImageProcessor::new()));
        let report = service
            .compose(source_path.to_str().unwrap(), &spec, &dest)
            .await
            .unwrap();

        assert_eq!(report.rounded_corners, Some(true));
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_end_to_end_with_real_processor() {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("logo.png");
        image::RgbaImage::from_pixel(300, 120, image::Rgba([31, 109, 120, 255]))
            .save(&source_path)
            .unwrap();
        let service = FaviconService::new(Arc::new(DefaultImageProcessor::new()));

        let composed = dir.path().join("composed.png");
        let report = service
            .compose(source_path.to_str().unwrap(), &composite_spec(), &composed)
            .await
            .unwrap();
        assert_eq!((report.width, report.height), (512, 512));
        assert_eq!(report.rounded_corners, Some(true));

        let padded = dir.path().join("padded.png");
        let report = service
            .pad(source_path.to_str().unwrap(), &PadSpec::new(0.1, 512).unwrap(), &padded)
            .await
            .unwrap();
        assert_eq!(report.rounded_corners, None);
        assert!(report.byte_len > 0);

        let glyph = GlyphSpec {
            canvas: CanvasSpec::new(512, 80, Color::WHITE).unwrap(),
            ink: Color::BRAND_TEAL,
            tilt: Some(0.2),
        };
        let drawn = dir.path().join("glyph.png");
        let report = service.glyph(&glyph, &drawn).await.unwrap();
        assert_eq!(report.rounded_corners, Some(true));

        let reverified = service.verify(&composed, 512, filled(64)).await.unwrap();
        assert_eq!(reverified.byte_len, std::fs::metadata(&composed).unwrap().len() as usize);
    }
}
