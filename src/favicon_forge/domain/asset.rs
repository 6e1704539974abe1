use image::ImageFormat;

/// Encoded output of a processing step.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: ImageFormat) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }
}

/// What a written favicon looks like when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetReport {
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
    /// `None` when no corner radius was checked.
    pub rounded_corners: Option<bool>,
}
