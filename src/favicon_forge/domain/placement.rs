use crate::domain::error::DomainError;

/// Scales `width × height` so the longer side equals `extent`, keeping the aspect ratio.
/// The shorter side is truncated and never drops below one pixel.
pub fn fit_within(width: u32, height: u32, extent: u32) -> (u32, u32) {
    let extent = extent.max(1);
    if width == 0 || height == 0 {
        return (extent, extent);
    }
    let scale_short = |short: u32, long: u32| -> u32 {
        ((extent as u64 * short as u64) / long as u64).max(1) as u32
    };
    if width > height {
        (extent, scale_short(height, width))
    } else {
        (scale_short(width, height), extent)
    }
}

/// Top-left offset that centres a `width × height` box on a square canvas.
pub fn centered_offset(canvas: u32, width: u32, height: u32) -> (u32, u32) {
    (canvas.saturating_sub(width) / 2, canvas.saturating_sub(height) / 2)
}

/// Largest intermediate square the pad step will allocate.
pub const MAX_PADDED_SIDE: u32 = 16_384;

/// Side of the transparent square that holds a `width × height` image plus
/// `ratio` of its longer side as margin on every edge.
pub fn padded_square_side(width: u32, height: u32, ratio: f32) -> Result<u32, DomainError> {
    let too_large = || {
        DomainError::InvalidGeometry(format!(
            "padding {}x{} by {} exceeds a {}px square",
            width, height, ratio, MAX_PADDED_SIDE
        ))
    };
    if !(ratio >= 0.0 && ratio.is_finite()) {
        return Err(DomainError::InvalidGeometry(format!("invalid padding ratio {}", ratio)));
    }

    let longest = width.max(height);
    let padding = (longest as f64 * ratio as f64).floor();
    if padding > u32::MAX as f64 {
        return Err(too_large());
    }
    let side = (padding as u32)
        .checked_mul(2)
        .and_then(|margins| margins.checked_add(longest))
        .ok_or_else(too_large)?;

    if side > MAX_PADDED_SIDE {
        return Err(too_large());
    }
    Ok(side)
}
