use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Image processing failed: {0}")]
    ImageProcessingError(String),

    #[error("Source image not found: {0}")]
    SourceNotFound(String),

    #[error("Data decoding failed: {0}")]
    DecodingError(String),

    #[error("Underlying image library error: {0}")]
    ImageLibError(#[from] image::ImageError),

    #[error("Underlying I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Base64 decode error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),
}
