use crate::error::ConversionError;
use crate::utils::filename::{numbered_file_name, sanitize_file_name};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

const FALLBACK_NAME: &str = "converted.pdf";
const MAX_NUMBERED_COPIES: usize = 1000;

/// Directory converted files are saved into.
#[derive(Debug, Clone)]
pub struct DownloadTarget {
    dir: PathBuf,
}

impl DownloadTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` under `file_name`, numbering the name if it is taken.
    /// The buffer is consumed so it is released as soon as the write ends.
    pub async fn save(&self, file_name: &str, bytes: Vec<u8>) -> Result<PathBuf, ConversionError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ConversionError::Save {
                path: self.dir.display().to_string(),
                source,
            })?;

        let name = sanitize_file_name(file_name).unwrap_or_else(|| FALLBACK_NAME.to_string());
        let (path, mut file) = self.claim(&name).await?;

        let written = async {
            file.write_all(&bytes).await?;
            file.flush().await
        }
        .await;
        drop(bytes);
        written.map_err(|source| ConversionError::Save {
            path: path.display().to_string(),
            source,
        })?;

        log::info!("Saved converted file to {}", path.display());
        Ok(path)
    }

    /// Creates the first free name atomically, so a file that appears
    /// between the check and the write is never clobbered.
    async fn claim(&self, name: &str) -> Result<(PathBuf, File), ConversionError> {
        let candidates = std::iter::once(name.to_string())
            .chain((1..=MAX_NUMBERED_COPIES).map(|n| numbered_file_name(name, n)));

        for candidate in candidates {
            let path = self.dir.join(candidate);
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(ConversionError::Save {
                        path: path.display().to_string(),
                        source,
                    })
                }
            }
        }

        log::warn!("No free name for {} in {}", name, self.dir.display());
        Err(ConversionError::Save {
            path: self.dir.join(name).display().to_string(),
            source: std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!("{MAX_NUMBERED_COPIES} numbered copies already exist"),
            ),
        })
    }
}
