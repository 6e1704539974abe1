use crate::domain::color::Color;
use crate::domain::error::DomainError;

/// Largest canvas or output side accepted, in pixels.
pub const MAX_SIDE: u32 = 4096;
/// Largest margin accepted around a padded source, as a share of its longer side.
pub const MAX_PADDING_RATIO: f32 = 1.0;

/// Square output canvas with a rounded-rectangle background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub size: u32,
    pub corner_radius: u32,
    pub background: Color,
}

impl CanvasSpec {
    pub fn new(size: u32, corner_radius: u32, background: Color) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::InvalidGeometry("canvas size must be positive".to_string()));
        }
        if size > MAX_SIDE {
            return Err(DomainError::InvalidGeometry(format!(
                "canvas size {} exceeds the maximum of {}",
                size, MAX_SIDE
            )));
        }
        if corner_radius > size / 2 {
            return Err(DomainError::InvalidGeometry(format!(
                "corner radius {} exceeds half the canvas size {}",
                corner_radius, size
            )));
        }
        Ok(Self {
            size,
            corner_radius,
            background,
        })
    }

    /// Corners this canvas must show once written. Edge midpoints are only
    /// expected to be filled when the background is visible.
    pub fn corner_check(&self) -> CornerCheck {
        CornerCheck {
            radius: self.corner_radius,
            filled_edges: self.background.a > 0,
        }
    }
}

/// What `inspect` compares a square image against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerCheck {
    pub radius: u32,
    /// Require the four edge midpoints to be non-transparent.
    pub filled_edges: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeSpec {
    pub canvas: CanvasSpec,
    /// Share of the canvas the longer side of the foreground occupies.
    pub fill_ratio: f32,
    /// Crop the source to its non-transparent content before fitting.
    pub trim: bool,
}

impl CompositeSpec {
    pub fn new(canvas: CanvasSpec, fill_ratio: f32, trim: bool) -> Result<Self, DomainError> {
        if !(fill_ratio > 0.0 && fill_ratio <= 1.0) {
            return Err(DomainError::InvalidGeometry(format!(
                "fill ratio must be in (0, 1], got {}",
                fill_ratio
            )));
        }
        Ok(Self {
            canvas,
            fill_ratio,
            trim,
        })
    }

    pub fn target_extent(&self) -> u32 {
        ((self.canvas.size as f64 * self.fill_ratio as f64).floor() as u32).max(1)
    }
}

/// Transparent square with a margin around the trimmed source, no background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PadSpec {
    pub padding_ratio: f32,
    pub output_size: u32,
}

impl PadSpec {
    pub fn new(padding_ratio: f32, output_size: u32) -> Result<Self, DomainError> {
        if !(0.0..=MAX_PADDING_RATIO).contains(&padding_ratio) {
            return Err(DomainError::InvalidGeometry(format!(
                "padding ratio must be in [0, {}], got {}",
                MAX_PADDING_RATIO, padding_ratio
            )));
        }
        if output_size == 0 || output_size > MAX_SIDE {
            return Err(DomainError::InvalidGeometry(format!(
                "output size must be in 1..={}, got {}",
                MAX_SIDE, output_size
            )));
        }
        Ok(Self {
            padding_ratio,
            output_size,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSpec {
    pub canvas: CanvasSpec,
    pub ink: Color,
    /// Horizontal shear factor; `None` draws the letter upright.
    pub tilt: Option<f32>,
}

/// Tuned parameter sets for the rounded composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Radius 64, 75% fill, source used as is.
    Soft,
    /// Radius 80, 70% fill, source trimmed to its content.
    Trimmed,
    /// Radius 80, 80% fill.
    Logo,
}

impl Preset {
    pub fn corner_radius(self) -> u32 {
        match self {
            Preset::Soft => 64,
            Preset::Trimmed | Preset::Logo => 80,
        }
    }

    pub fn fill_ratio(self) -> f32 {
        match self {
            Preset::Soft => 0.75,
            Preset::Trimmed => 0.70,
            Preset::Logo => 0.80,
        }
    }

    pub fn trim(self) -> bool {
        matches!(self, Preset::Trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_rejects_zero_size_and_oversized_radius() {
        assert!(CanvasSpec::new(0, 0, Color::WHITE).is_err());
        assert!(CanvasSpec::new(512, 257, Color::WHITE).is_err());
        assert!(CanvasSpec::new(512, 256, Color::WHITE).is_ok());
        assert!(CanvasSpec::new(512, 0, Color::WHITE).is_ok());
    }

    #[test]
    fn test_canvas_rejects_oversized_side() {
        assert!(CanvasSpec::new(MAX_SIDE, 64, Color::WHITE).is_ok());
        assert!(matches!(
            CanvasSpec::new(100_000, 64, Color::WHITE),
            Err(DomainError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_corner_check_follows_background_alpha() {
        let opaque = CanvasSpec::new(512, 64, Color::WHITE).unwrap();
        assert_eq!(opaque.corner_check(), CornerCheck { radius: 64, filled_edges: true });

        let clear = CanvasSpec::new(512, 64, Color::TRANSPARENT).unwrap();
        assert_eq!(clear.corner_check(), CornerCheck { radius: 64, filled_edges: false });
    }

    #[test]
    fn test_fill_ratio_bounds() {
        let canvas = CanvasSpec::new(512, 64, Color::WHITE).unwrap();
        assert!(CompositeSpec::new(canvas, 0.0, false).is_err());
        assert!(CompositeSpec::new(canvas, 1.2, false).is_err());
        assert!(CompositeSpec::new(canvas, f32::NAN, false).is_err());
        assert!(CompositeSpec::new(canvas, 1.0, false).is_ok());
    }

    #[test]
    fn test_target_extent_truncates() {
        let canvas = CanvasSpec::new(512, 64, Color::WHITE).unwrap();
        assert_eq!(CompositeSpec::new(canvas, 0.75, false).unwrap().target_extent(), 384);
        assert_eq!(CompositeSpec::new(canvas, 0.70, false).unwrap().target_extent(), 358);
        assert_eq!(CompositeSpec::new(canvas, 0.80, false).unwrap().target_extent(), 409);
    }

    #[test]
    fn test_pad_spec_validation() {
        assert!(PadSpec::new(-0.1, 512).is_err());
        assert!(PadSpec::new(0.1, 0).is_err());
        assert!(PadSpec::new(f32::NAN, 512).is_err());
        assert!(PadSpec::new(3_000_000.0, 512).is_err());
        assert!(PadSpec::new(0.1, MAX_SIDE + 1).is_err());
        assert!(PadSpec::new(MAX_PADDING_RATIO, MAX_SIDE).is_ok());
        assert_eq!(PadSpec::new(0.1, 512).unwrap().output_size, 512);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Preset::Soft.corner_radius(), 64);
        assert!(!Preset::Soft.trim());
        assert!(Preset::Trimmed.trim());
        assert_eq!(Preset::Logo.fill_ratio(), 0.80);
    }
}
