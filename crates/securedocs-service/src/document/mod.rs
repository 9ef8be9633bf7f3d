//! Document workflows: detail view, upload, download and edits.

pub mod detail;
pub mod download;
pub mod service;
pub mod upload;

pub use detail::DocumentDetail;
pub use download::{DownloadReport, DownloadService};
pub use service::DocumentService;
pub use upload::UploadService;
