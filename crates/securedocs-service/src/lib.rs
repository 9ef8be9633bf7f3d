//! # securedocs-service
//!
//! Front-end workflows built on the [`DocumentApi`](securedocs_client::DocumentApi)
//! seam: folder navigation (breadcrumbs, listings, stale-response protection),
//! preview classification and loading, and the document and folder
//! operations offered to the user.
//!
//! Services take their dependencies at construction time as `Arc`s.

pub mod context;
pub mod document;
pub mod folder;
pub mod format;
pub mod navigation;
pub mod preview;

#[cfg(test)]
pub(crate) mod testing;

pub use context::UserContext;
pub use document::{DocumentDetail, DocumentService, DownloadService, UploadService};
pub use folder::FolderService;
pub use navigation::{
    BreadcrumbTrail, ContentLister, FolderContents, FolderView, Navigator, PathOutcome,
    PathResolver,
};
pub use preview::{PreviewContent, PreviewLoader, PreviewMode};
