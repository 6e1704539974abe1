use super::error::ApplicationError;
use crate::domain::canvas::{CanvasSpec, CompositeSpec, GlyphSpec, PadSpec, Preset};
use crate::domain::color::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults for every subcommand, optionally read from a JSON file.
/// Command-line flags win over these values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeConfig {
    pub output: PathBuf,
    pub canvas_size: u32,
    pub corner_radius: u32,
    pub glyph_corner_radius: u32,
    pub fill_ratio: f32,
    pub trim: bool,
    pub background: String,
    pub ink: String,
    pub tilt: f32,
    pub padding_ratio: f32,
    pub email_output: PathBuf,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("public/favicon.png"),
            canvas_size: 512,
            corner_radius: Preset::Soft.corner_radius(),
            glyph_corner_radius: 80,
            fill_ratio: Preset::Soft.fill_ratio(),
            trim: false,
            background: Color::WHITE.to_hex(),
            ink: Color::BRAND_TEAL.to_hex(),
            tilt: crate::domain::glyph::DEFAULT_TILT,
            padding_ratio: 0.10,
            email_output: PathBuf::from("email_template_confirmation.html"),
        }
    }
}

/// Canvas flags shared by the compose and glyph subcommands.
#[derive(Debug, Clone, Default)]
pub struct CanvasOverrides {
    pub size: Option<u32>,
    pub corner_radius: Option<u32>,
    pub background: Option<String>,
}

impl ForgeConfig {
    pub async fn load(path: &Path) -> Result<Self, ApplicationError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            ApplicationError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
            .map_err(|e| ApplicationError::ConfigurationError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn canvas_spec(
        &self,
        overrides: &CanvasOverrides,
        default_radius: u32,
    ) -> Result<CanvasSpec, ApplicationError> {
        let background = overrides.background.as_deref().unwrap_or(&self.background);
        Ok(CanvasSpec::new(
            overrides.size.unwrap_or(self.canvas_size),
            overrides.corner_radius.unwrap_or(default_radius),
            Color::from_hex(background)?,
        )?)
    }

    /// Resolution order: config, then preset, then explicit flags.
    pub fn composite_spec(
        &self,
        canvas: &CanvasOverrides,
        preset: Option<Preset>,
        fill_ratio: Option<f32>,
        trim: Option<bool>,
    ) -> Result<CompositeSpec, ApplicationError> {
        let radius = preset.map(Preset::corner_radius).unwrap_or(self.corner_radius);
        let fill = fill_ratio
            .or(preset.map(Preset::fill_ratio))
            .unwrap_or(self.fill_ratio);
        let trim = trim.or(preset.map(Preset::trim)).unwrap_or(self.trim);

        Ok(CompositeSpec::new(self.canvas_spec(canvas, radius)?, fill, trim)?)
    }

    pub fn pad_spec(&self, padding_ratio: Option<f32>, size: Option<u32>) -> Result<PadSpec, ApplicationError> {
        Ok(PadSpec::new(
            padding_ratio.unwrap_or(self.padding_ratio),
            size.unwrap_or(self.canvas_size),
        )?)
    }

    pub fn glyph_spec(
        &self,
        canvas: &CanvasOverrides,
        ink: Option<&str>,
        tilted: bool,
        tilt: Option<f32>,
    ) -> Result<GlyphSpec, ApplicationError> {
        let ink = Color::from_hex(ink.unwrap_or(&self.ink))?;
        let tilt = (tilted || tilt.is_some()).then(|| tilt.unwrap_or(self.tilt));
        Ok(GlyphSpec {
            canvas: self.canvas_spec(canvas, self.glyph_corner_radius)?,
            ink,
            tilt,
        })
    }
}
