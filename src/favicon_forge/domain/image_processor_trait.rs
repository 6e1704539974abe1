use crate::domain::canvas::{CompositeSpec, CornerCheck, GlyphSpec, PadSpec};
use crate::domain::asset::{AssetReport, EncodedImage};
use crate::infrastructure::error::InfrastructureError;

/// Pixel work behind every favicon operation. Inputs and outputs are encoded bytes.
#[cfg_attr(test, mockall::automock)]
pub trait ImageProcessor {
    /// Fits `source` onto a rounded-square background.
    fn compose_rounded(
        &self,
        source: &[u8],
        spec: &CompositeSpec,
    ) -> Result<EncodedImage, InfrastructureError>;

    /// Centres the trimmed `source` on a transparent square with a margin.
    fn pad_square(&self, source: &[u8], spec: &PadSpec) -> Result<EncodedImage, InfrastructureError>;

    /// Draws the geometric letterform on a rounded-square background.
    fn render_glyph(&self, spec: &GlyphSpec) -> Result<EncodedImage, InfrastructureError>;

    /// Decodes `encoded` and reports its size. With `corners` set to a positive
    /// radius, `rounded_corners` records whether the image matches that rounded
    /// square; `None` or a zero radius leaves it unchecked.
    fn inspect(
        &self,
        encoded: &[u8],
        corners: Option<CornerCheck>,
    ) -> Result<AssetReport, InfrastructureError>;
}
