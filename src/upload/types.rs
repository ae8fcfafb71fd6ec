use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the document bytes live until they are sent.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            source: FileSource::Bytes(bytes),
        }
    }

    /// Loads the full document for the multipart body.
    pub async fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read(path).await,
            FileSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// Messages sent from the background pipeline to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionUpdate {
    /// Cosmetic progress tick.
    Tick,
    /// A 2xx response arrived; the body is being read.
    ResponseReceived,
    Downloaded(PathBuf),
    Failed(String),
}
