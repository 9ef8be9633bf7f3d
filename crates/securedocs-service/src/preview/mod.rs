//! Document preview: choosing a preview mode and fetching what it needs.

pub mod classifier;
pub mod loader;

pub use classifier::{PreviewMode, classify};
pub use loader::{PreviewContent, PreviewLoader};
