//! Downloading documents to local files with checksum verification.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use securedocs_client::{ByteStream, DocumentApi};
use securedocs_core::error::{AppError, ErrorKind};
use securedocs_core::result::AppResult;
use securedocs_entity::document::Document;

/// Outcome of a finished download.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReport {
    /// Where the content was written.
    pub path: PathBuf,
    /// Bytes written.
    pub bytes: u64,
    /// Hex SHA-256 of the content.
    pub sha256: String,
    /// Whether the digest was checked against the document's checksum.
    pub verified: bool,
}

/// Streams document content to disk.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// Content endpoint.
    api: Arc<dyn DocumentApi>,
}

/// File name to save `document` under, with path separators removed.
pub fn local_file_name(document: &Document) -> String {
    let name: String = document
        .name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    let name = name.trim().trim_start_matches('.');
    if name.is_empty() {
        document.id.to_string()
    } else {
        name.to_string()
    }
}

/// Where to write `document`: into `output` if it is a directory, to
/// `output` itself otherwise, or into the working directory.
pub async fn resolve_output_path(document: &Document, output: Option<&Path>) -> AppResult<PathBuf> {
    let file_name = local_file_name(document);
    let Some(output) = output else {
        return Ok(PathBuf::from(file_name));
    };

    match tokio::fs::metadata(output).await {
        Ok(meta) if meta.is_dir() => Ok(output.join(file_name)),
        Ok(_) => Ok(output.to_path_buf()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let parent_ok = match output.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    tokio::fs::metadata(parent).await.is_ok_and(|m| m.is_dir())
                }
                _ => true,
            };
            if parent_ok {
                Ok(output.to_path_buf())
            } else {
                Err(AppError::validation(format!(
                    "Output directory does not exist: {}",
                    output.display()
                )))
            }
        }
        Err(e) => Err(e.into()),
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    /// Download `document` to `path`.
    ///
    /// Content is written to a sibling `.part` file that replaces `path`
    /// only once the checksum matches, so a failed download leaves any
    /// existing file untouched and no partial file behind.
    pub async fn download_to(&self, document: &Document, path: &Path) -> AppResult<DownloadReport> {
        let mut stream = self.api.download_stream(document.id).await?;

        let part = partial_path(path);
        let file = tokio::fs::File::create(&part).await?;
        let result = match self.write_content(document, &mut stream, file).await {
            Ok(written) => tokio::fs::rename(&part, path)
                .await
                .map(|()| written)
                .map_err(AppError::from),
            Err(e) => Err(e),
        };

        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(&part).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %part.display(), error = %e, "Failed to remove partial download");
                }
            }
        }

        let (bytes, sha256, verified) = result?;
        tracing::info!(
            document_id = %document.id,
            path = %path.display(),
            bytes,
            verified,
            "Document downloaded"
        );

        Ok(DownloadReport {
            path: path.to_path_buf(),
            bytes,
            sha256,
            verified,
        })
    }

    /// Stream into `file`, returning the byte count, hex digest and whether
    /// it was checked against the document's checksum.
    async fn write_content(
        &self,
        document: &Document,
        stream: &mut ByteStream,
        mut file: tokio::fs::File,
    ) -> AppResult<(u64, String, bool)> {
        let mut hasher = Sha256::new();
        let mut bytes = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::with_source(ErrorKind::Network, "Download interrupted", e)
            })?;
            hasher.update(&chunk);
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;

        let sha256 = hex::encode(hasher.finalize());
        let verified = match document.sha256_checksum() {
            Some(expected) if !expected.eq_ignore_ascii_case(&sha256) => {
                return Err(AppError::validation(format!(
                    "Checksum mismatch for '{}': expected {expected}, got {sha256}",
                    document.name
                )));
            }
            Some(_) => true,
            None => false,
        };
        Ok((bytes, sha256, verified))
    }
}

/// `notes.txt` becomes `.notes.txt.part` in the same directory.
fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.part"))
}
