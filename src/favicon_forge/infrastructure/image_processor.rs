use super::error::InfrastructureError;
use crate::domain::canvas::{CompositeSpec, CornerCheck, GlyphSpec, PadSpec};
use crate::domain::color::Color;
use crate::domain::glyph::{LetterD, Shape};
use crate::domain::asset::{AssetReport, EncodedImage};
use crate::domain::image_processor_trait::ImageProcessor;
use crate::domain::placement::{centered_offset, fit_within, padded_square_side};
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::geometric_transformations::{warp_with, Interpolation};
use imageproc::rect::Rect;
use std::io::Cursor;

const CLEAR: Rgba<u8> = Color::TRANSPARENT.to_rgba();

pub struct DefaultImageProcessor;

impl DefaultImageProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DefaultImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProcessor for DefaultImageProcessor {
    fn compose_rounded(
        &self,
        source: &[u8],
        spec: &CompositeSpec,
    ) -> Result<EncodedImage, InfrastructureError> {
        let mut img = decode(source)?;
        log::debug!("decoded source {}x{}", img.width(), img.height());

        if spec.trim {
            img = trim_to_content(img);
            log::debug!("trimmed source to {}x{}", img.width(), img.height());
        }

        let size = spec.canvas.size;
        let (new_w, new_h) = fit_within(img.width(), img.height(), spec.target_extent());
        let resized = imageops::resize(&img, new_w, new_h, FilterType::Lanczos3);

        let mask = rounded_mask(size, spec.canvas.corner_radius);
        let mut canvas = RgbaImage::from_pixel(size, size, CLEAR);
        paint_through_mask(&mut canvas, spec.canvas.background, &mask);

        let (x, y) = centered_offset(size, new_w, new_h);
        imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
        clip_to_mask(&mut canvas, &mask);

        log::debug!("placed {}x{} foreground at ({}, {})", new_w, new_h, x, y);
        encode_png(&canvas)
    }

    fn pad_square(&self, source: &[u8], spec: &PadSpec) -> Result<EncodedImage, InfrastructureError> {
        let img = trim_to_content(decode(source)?);
        let (w, h) = img.dimensions();

        let side = padded_square_side(w, h, spec.padding_ratio)
            .map_err(|e| InfrastructureError::ImageProcessingError(e.to_string()))?;
        let mut square = RgbaImage::from_pixel(side, side, CLEAR);
        let (x, y) = centered_offset(side, w, h);
        imageops::overlay(&mut square, &img, x as i64, y as i64);

        let resized = imageops::resize(&square, spec.output_size, spec.output_size, FilterType::Lanczos3);
        encode_png(&resized)
    }

    fn render_glyph(&self, spec: &GlyphSpec) -> Result<EncodedImage, InfrastructureError> {
        let size = spec.canvas.size;
        let mut layer = draw_letter(size, spec.ink, spec.tilt.is_some());

        if let Some(tilt) = spec.tilt {
            layer = warp_with(
                &layer,
                move |x, y| LetterD::shear_source(x, y, tilt, size),
                Interpolation::Bicubic,
                CLEAR,
            );
        }

        let mask = rounded_mask(size, spec.canvas.corner_radius);
        let mut canvas = RgbaImage::from_pixel(size, size, CLEAR);
        paint_through_mask(&mut canvas, spec.canvas.background, &mask);
        imageops::overlay(&mut canvas, &layer, 0, 0);
        clip_to_mask(&mut canvas, &mask);

        encode_png(&canvas)
    }

    fn inspect(
        &self,
        encoded: &[u8],
        corners: Option<CornerCheck>,
    ) -> Result<AssetReport, InfrastructureError> {
        let img = decode(encoded)?;
        let rounded_corners = corners
            .filter(|check| check.radius > 0)
            .map(|check| has_rounded_corners(&img, check));

        Ok(AssetReport {
            width: img.width(),
            height: img.height(),
            byte_len: encoded.len(),
            rounded_corners,
        })
    }
}

fn decode(bytes: &[u8]) -> Result<RgbaImage, InfrastructureError> {
    let reader = image::io::Reader::new(Cursor::new(bytes)).with_guessed_format()?;
    let img = reader.decode()?.to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(InfrastructureError::ImageProcessingError(
            "decoded image has no pixels".to_string(),
        ));
    }
    Ok(img)
}

fn encode_png(img: &RgbaImage) -> Result<EncodedImage, InfrastructureError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(EncodedImage::new(
        buffer.into_inner(),
        img.width(),
        img.height(),
        ImageFormat::Png,
    ))
}

/// Single-channel mask of a `size × size` rounded rectangle: 255 inside, 0 outside.
/// Pixels are sampled at their centres; a zero radius yields a plain square.
pub fn rounded_mask(size: u32, radius: u32) -> GrayImage {
    let r = radius as f32;
    let far = size as f32 - r;

    GrayImage::from_fn(size, size, |x, y| {
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        // distance into the corner square along each axis, 0 on the straight edges
        let dx = if px < r { r - px } else if px > far { px - far } else { 0.0 };
        let dy = if py < r { r - py } else if py > far { py - far } else { 0.0 };
        if dx * dx + dy * dy <= r * r {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn paint_through_mask(canvas: &mut RgbaImage, fill: Color, mask: &GrayImage) {
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let coverage = mask.get_pixel(x, y)[0] as u16;
        let alpha = (fill.a as u16 * coverage / 255) as u8;
        if alpha > 0 {
            *pixel = Rgba([fill.r, fill.g, fill.b, alpha]);
        }
    }
}

fn clip_to_mask(canvas: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let coverage = mask.get_pixel(x, y)[0] as u16;
        pixel[3] = (pixel[3] as u16 * coverage / 255) as u8;
        if pixel[3] == 0 {
            *pixel = CLEAR;
        }
    }
}

/// Smallest `(x, y, width, height)` box holding every pixel with non-zero alpha.
pub fn content_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0u32, 0u32);
    let mut found = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        found = true;
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }

    found.then(|| (min.0, min.1, max.0 - min.0 + 1, max.1 - min.1 + 1))
}

fn trim_to_content(img: RgbaImage) -> RgbaImage {
    match content_bounds(&img) {
        Some((x, y, w, h)) if (w, h) != img.dimensions() => {
            imageops::crop_imm(&img, x, y, w, h).to_image()
        }
        _ => img,
    }
}

fn draw_letter(size: u32, ink: Color, tilted: bool) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(size, size, CLEAR);
    let ink = ink.to_rgba();

    for shape in LetterD::shapes(size, tilted) {
        match shape {
            Shape::Disc { center, radius } => draw_filled_circle_mut(&mut layer, center, radius, ink),
            Shape::Bar {
                left,
                top,
                width,
                height,
            } => draw_filled_rect_mut(&mut layer, Rect::at(left, top).of_size(width, height), ink),
            Shape::Hole { center, radius } => {
                draw_filled_circle_mut(&mut layer, center, radius, CLEAR)
            }
        }
    }
    layer
}

/// Walks each corner's diagonal comparing the image alpha with the rounded mask
/// of the given radius, and optionally requires filled edge midpoints.
fn has_rounded_corners(img: &RgbaImage, check: CornerCheck) -> bool {
    let radius = check.radius;
    let (w, h) = img.dimensions();
    if w != h || w == 0 || radius > w / 2 {
        return false;
    }
    let mask = rounded_mask(w, radius);
    let last = w - 1;

    let diagonal_matches = (0..radius).all(|i| {
        [(i, i), (last - i, i), (i, last - i), (last - i, last - i)]
            .into_iter()
            .all(|(x, y)| {
                let expected_clear = mask.get_pixel(x, y)[0] == 0;
                let actual_clear = img.get_pixel(x, y)[3] == 0;
                !expected_clear || actual_clear
            })
    });

    let corners_clear = [(0, 0), (last, 0), (0, last), (last, last)]
        .into_iter()
        .all(|(x, y)| mask.get_pixel(x, y)[0] != 0 || img.get_pixel(x, y)[3] == 0);

    let mid = w / 2;
    let edges_filled = !check.filled_edges
        || [(mid, 0), (0, mid), (last, mid), (mid, last)]
            .into_iter()
            .all(|(x, y)| img.get_pixel(x, y)[3] > 0);

    diagonal_matches && corners_clear && edges_filled
}
