use super::error::InfrastructureError;
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

pub struct LocalFileStorage;

impl LocalFileStorage {
    pub fn new() -> Self {
        Self
    }

    /// Writes `data` to `path`, creating missing parent directories first.
    pub async fn save(&self, path: &Path, data: &[u8]) -> Result<(), InfrastructureError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = File::create(path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        log::debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    pub async fn read(&self, path: &Path) -> Result<Vec<u8>, InfrastructureError> {
        Ok(fs::read(path).await?)
    }
}

impl Default for LocalFileStorage {
    fn default() -> Self {
        Self::new()
    }
}
