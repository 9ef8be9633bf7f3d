//! Fetching preview content.

use std::sync::Arc;

use bytes::Bytes;

use securedocs_client::DocumentApi;
use securedocs_entity::document::Document;

use super::classifier::PreviewMode;

/// Content ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewContent {
    /// Decoded text.
    Text(String),
    /// Raw media for PDF, image, video or audio viewers.
    Media { mode: PreviewMode, data: Bytes },
    /// The content could not be fetched; the preview is not shown.
    Unavailable { mode: PreviewMode, reason: String },
    /// The type has no inline preview.
    Unsupported,
}

impl PreviewContent {
    /// The mode this content was loaded for.
    pub fn mode(&self) -> PreviewMode {
        match self {
            Self::Text(_) => PreviewMode::Text,
            Self::Media { mode, .. } | Self::Unavailable { mode, .. } => *mode,
            Self::Unsupported => PreviewMode::Unsupported,
        }
    }

    /// Whether there is something to show.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Media { .. })
    }
}

/// Loads preview content for documents.
#[derive(Debug, Clone)]
pub struct PreviewLoader {
    /// Content downloads.
    api: Arc<dyn DocumentApi>,
}

impl PreviewLoader {
    /// Creates a loader.
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    /// Load the preview of `document`.
    ///
    /// Download failures downgrade the preview to `Unavailable` instead
    /// of failing. Unsupported types are never downloaded.
    pub async fn load(&self, document: &Document) -> PreviewContent {
        let mode = PreviewMode::for_content_type(&document.content_type);
        if !mode.can_preview() {
            return PreviewContent::Unsupported;
        }

        let data = match self.api.download(document.id).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(document_id = %document.id, error = %e, "Preview download failed");
                return PreviewContent::Unavailable {
                    mode,
                    reason: e.message,
                };
            }
        };

        match mode {
            PreviewMode::Text => PreviewContent::Text(String::from_utf8_lossy(&data).into_owned()),
            _ => PreviewContent::Media { mode, data },
        }
    }
}
