//! Folder navigation: breadcrumb reconstruction, content listing and the
//! navigator that keeps the current view consistent.

pub mod listing;
pub mod navigator;
pub mod path;

pub use listing::{ContentLister, FolderContents};
pub use navigator::{FolderView, NavigationToken, Navigator, ViewState};
pub use path::{BreadcrumbTrail, PathOutcome, PathResolver};
