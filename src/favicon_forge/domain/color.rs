use crate::domain::error::DomainError;
use image::Rgba;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    /// `#1f6d78`, the ink of the geometric letterform.
    pub const BRAND_TEAL: Color = Color::new(31, 109, 120, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    pub fn from_hex(hex_str: &str) -> Result<Self, DomainError> {
        let hex = hex_str.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::InvalidInput(format!("not a hex color: {:?}", hex_str)));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| DomainError::InvalidInput(format!("bad color channel in {:?}: {}", hex_str, e)))
        };

        match hex.len() {
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?)),
            _ => Err(DomainError::InvalidInput(format!(
                "expected RRGGBB or RRGGBBAA, got {:?}",
                hex_str
            ))),
        }
    }

    /// Lowercase `#rrggbb`, with an alpha pair only when not fully opaque.
    pub fn to_hex(self) -> String {
        let rgb = format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        if self.a == 255 {
            rgb
        } else {
            format!("{}{:02x}", rgb, self.a)
        }
    }

    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}
