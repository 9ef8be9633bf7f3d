//! Content type to preview mode mapping.

use std::fmt;

use serde::Serialize;

/// How a document can be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewMode {
    Pdf,
    Image,
    Text,
    Video,
    Audio,
    /// No inline preview; offer a download instead.
    Unsupported,
}

/// Markers checked in order; the first match wins.
const RULES: &[(PreviewMode, &[&str])] = &[
    (PreviewMode::Pdf, &["pdf"]),
    (PreviewMode::Image, &["image"]),
    (PreviewMode::Video, &["video"]),
    (PreviewMode::Audio, &["audio"]),
    (PreviewMode::Text, &["text", "json", "xml", "csv"]),
];

/// Classify a content type. Matching is a case-insensitive substring
/// test, so parameters such as `; charset=utf-8` do not matter.
pub fn classify(content_type: &str) -> PreviewMode {
    let ct = content_type.to_ascii_lowercase();
    RULES
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| ct.contains(m)))
        .map_or(PreviewMode::Unsupported, |(mode, _)| *mode)
}

impl PreviewMode {
    /// Classify a content type.
    pub fn for_content_type(content_type: &str) -> Self {
        classify(content_type)
    }

    /// Whether an inline preview exists.
    pub fn can_preview(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Text => "text",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
