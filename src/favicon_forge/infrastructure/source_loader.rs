use super::error::InfrastructureError;
use base64::decode;
use std::io::ErrorKind;
use tokio::fs;

/// Resolves a source argument to raw image bytes: either a `data:` URL or a file path.
pub struct SourceLoader;

impl SourceLoader {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, source: &str) -> Result<Vec<u8>, InfrastructureError> {
        if source.starts_with("data:") {
            let base64_data = source.split(',').nth(1).ok_or_else(|| {
                InfrastructureError::DecodingError("Invalid data URL: missing comma".to_string())
            })?;
            log::debug!("decoding inline data URL ({} chars)", base64_data.len());
            return Ok(decode(base64_data.trim())?);
        }

        match fs::read(source).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(InfrastructureError::SourceNotFound(source.to_string()))
            }
            Err(e) => Err(InfrastructureError::IoError(e)),
        }
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new()
    }
}
