//! Geometric lowercase "d": a capped vertical stem on the right and a round
//! bowl with a punched counter on the left.
//!
//! Proportions are tuned on a 512px grid and scaled to the requested canvas.

const REFERENCE_SIZE: f32 = 512.0;

const STEM_WIDTH: f32 = 80.0;
const STEM_HALF_HEIGHT: f32 = 150.0;
const STEM_OFFSET_FROM_CENTER: f32 = 40.0;
const BOWL_RADIUS: f32 = 110.0;
const BOWL_OFFSET_FROM_STEM: f32 = 60.0;
/// The tilted letter is drawn this far left so it lands centred after the shear.
const TILT_PRESHIFT: f32 = -40.0;
/// Horizontal translation folded into the shear mapping.
pub const SHEAR_TRANSLATION: f32 = -50.0;
pub const DEFAULT_TILT: f32 = 0.2;

/// One primitive of the letterform, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Disc { center: (i32, i32), radius: i32 },
    Bar { left: i32, top: i32, width: u32, height: u32 },
    /// Cleared back to transparency.
    Hole { center: (i32, i32), radius: i32 },
}

pub struct LetterD;

impl LetterD {
    pub fn scale(canvas_size: u32) -> f32 {
        canvas_size as f32 / REFERENCE_SIZE
    }

    pub fn shapes(canvas_size: u32, tilted: bool) -> Vec<Shape> {
        let scale = Self::scale(canvas_size);
        let px = |v: f32| (v * scale).round() as i32;

        let center = REFERENCE_SIZE / 2.0;
        let offset_x = if tilted { TILT_PRESHIFT } else { 0.0 };

        let stem_x = center + STEM_OFFSET_FROM_CENTER + offset_x;
        let stem_top = center - STEM_HALF_HEIGHT;
        let stem_bottom = center + STEM_HALF_HEIGHT;
        let half_stem = STEM_WIDTH / 2.0;

        let bowl_center = (
            px(stem_x - BOWL_OFFSET_FROM_STEM),
            px(stem_bottom - BOWL_RADIUS - STEM_WIDTH / 4.0),
        );
        let counter_radius = BOWL_RADIUS - STEM_WIDTH;

        let bowl = Shape::Disc {
            center: bowl_center,
            radius: px(BOWL_RADIUS),
        };
        let counter = Shape::Hole {
            center: bowl_center,
            radius: px(counter_radius),
        };
        let stem = [
            Shape::Bar {
                left: px(stem_x - half_stem),
                top: px(stem_top),
                width: px(STEM_WIDTH).max(1) as u32,
                height: px(stem_bottom - stem_top).max(1) as u32,
            },
            Shape::Disc {
                center: (px(stem_x), px(stem_top)),
                radius: px(half_stem),
            },
            Shape::Disc {
                center: (px(stem_x), px(stem_bottom)),
                radius: px(half_stem),
            },
        ];

        // The counter overlaps the stem. Upright, the stem is painted over it;
        // tilted, the counter is cut last.
        let mut shapes = vec![bowl];
        if tilted {
            shapes.extend(stem);
            shapes.push(counter);
        } else {
            shapes.push(counter);
            shapes.extend(stem);
        }
        shapes
    }

    /// Maps an output pixel back to the upright layer it is sampled from.
    pub fn shear_source(x: f32, y: f32, tilt: f32, canvas_size: u32) -> (f32, f32) {
        (x + tilt * y + SHEAR_TRANSLATION * Self::scale(canvas_size), y)
    }
}
