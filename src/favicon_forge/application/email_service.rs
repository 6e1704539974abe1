use super::error::ApplicationError;
use crate::domain::email_template::{EmailTemplate, LogoPayload};
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::file_storage::LocalFileStorage;
use crate::infrastructure::source_loader::SourceLoader;
use image::ImageFormat;
use std::path::Path;

/// Inlines a logo into a static HTML email as a `data:` URI.
pub struct EmailService {
    source_loader: SourceLoader,
    file_storage: LocalFileStorage,
}

impl EmailService {
    pub fn new() -> Self {
        Self {
            source_loader: SourceLoader::new(),
            file_storage: LocalFileStorage::new(),
        }
    }

    pub async fn embed(
        &self,
        logo: &str,
        template: Option<&Path>,
        dest: &Path,
    ) -> Result<LogoPayload, ApplicationError> {
        let raw = self.source_loader.load(logo).await?;
        let payload = logo_payload(&raw)?;
        log::info!("embedding {} logo ({} base64 chars)", payload.mime, payload.base64.len());

        let template = match template {
            Some(path) => {
                let body = self.file_storage.read(path).await?;
                let body = String::from_utf8(body).map_err(|e| {
                    DomainError::InvalidInput(format!("template {} is not UTF-8: {}", path.display(), e))
                })?;
                EmailTemplate::from_string(body)?
            }
            None => EmailTemplate::confirmation(),
        };

        let html = template.render(&payload);
        self.file_storage.save(dest, html.as_bytes()).await?;
        log::info!("wrote {} ({} bytes)", dest.display(), html.len());
        Ok(payload)
    }
}

impl Default for EmailService {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts base64 text (line breaks allowed) or raw image bytes.
pub fn logo_payload(raw: &[u8]) -> Result<LogoPayload, ApplicationError> {
    if let Some(encoded) = base64_text(raw) {
        let decoded = base64::decode(&encoded).map_err(InfrastructureError::from)?;
        let mime = image::guess_format(&decoded).map(mime_type).unwrap_or("image/png");
        return Ok(LogoPayload {
            mime,
            base64: encoded,
        });
    }

    let format = image::guess_format(raw).map_err(|_| {
        DomainError::InvalidInput("logo is neither base64 text nor a known image format".to_string())
    })?;
    Ok(LogoPayload {
        mime: mime_type(format),
        base64: base64::encode(raw),
    })
}

/// Whitespace-free base64 when `raw` is UTF-8 text made only of base64 characters.
fn base64_text(raw: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(raw).ok()?;
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let is_base64 = !cleaned.is_empty()
        && cleaned
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='));
    is_base64.then(|| cleaned)
}

fn mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Ico => "image/x-icon",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}
