//! Display helpers for sizes and document types.

use std::fmt;

use serde::Serialize;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

/// Human-readable byte count: `"512 bytes"`, `"1.50 KB"`, `"2.00 MB"`.
pub fn format_file_size(size: u64) -> String {
    if size < KB {
        format!("{size} bytes")
    } else if size < MB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else {
        format!("{:.2} GB", size as f64 / GB as f64)
    }
}

/// Icon category shown next to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentIcon {
    Pdf,
    WordDocument,
    Spreadsheet,
    Presentation,
    Image,
    Video,
    Audio,
    Text,
    Archive,
    Generic,
}

impl DocumentIcon {
    /// Pick the icon for a content type.
    pub fn for_content_type(content_type: &str) -> Self {
        let ct = content_type.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| ct.contains(n));

        if ct.is_empty() {
            Self::Generic
        } else if has(&["pdf"]) {
            Self::Pdf
        } else if has(&["word", "document", "msword"]) {
            Self::WordDocument
        } else if has(&["excel", "spreadsheet", "csv"]) {
            Self::Spreadsheet
        } else if has(&["powerpoint", "presentation"]) {
            Self::Presentation
        } else if has(&["image"]) {
            Self::Image
        } else if has(&["video"]) {
            Self::Video
        } else if has(&["audio"]) {
            Self::Audio
        } else if has(&["text"]) {
            Self::Text
        } else if has(&["zip", "rar", "tar", "7z"]) {
            Self::Archive
        } else {
            Self::Generic
        }
    }

    /// Short label for tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::WordDocument => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Archive => "archive",
            Self::Generic => "file",
        }
    }
}

impl fmt::Display for DocumentIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
