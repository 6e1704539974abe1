pub mod asset;
pub mod canvas;
pub mod color;
pub mod email_template;
pub mod error;
pub mod glyph;
pub mod image_processor_trait;
pub mod placement;
