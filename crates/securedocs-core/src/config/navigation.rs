//! Folder navigation configuration.

use serde::{Deserialize, Serialize};

/// Settings for breadcrumb resolution and content listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Maximum number of ancestor hops the breadcrumb walk may take.
    #[serde(default = "default_max_depth")]
    pub max_breadcrumb_depth: usize,
    /// Sort listed folders and documents by name (case-insensitive, stable).
    #[serde(default = "default_true")]
    pub sort_by_name: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_breadcrumb_depth: default_max_depth(),
            sort_by_name: true,
        }
    }
}

fn default_max_depth() -> usize {
    64
}

fn default_true() -> bool {
    true
}
