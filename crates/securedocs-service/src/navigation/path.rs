//! Breadcrumb reconstruction by walking parent links.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use securedocs_client::DocumentApi;
use securedocs_core::config::NavigationConfig;
use securedocs_core::error::ErrorKind;
use securedocs_core::types::FolderId;
use securedocs_entity::folder::Breadcrumb;

/// Why a breadcrumb walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    /// A root folder was reached.
    Complete,
    /// Fetching folder `at` failed.
    Truncated { at: FolderId, kind: ErrorKind },
    /// Folder `at` was reached a second time.
    CycleDetected { at: FolderId },
    /// The hop limit was reached before a root.
    DepthExceeded { limit: usize },
}

/// Ordered root-to-current breadcrumb entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbTrail {
    /// Entries, root first.
    pub entries: Vec<Breadcrumb>,
    /// How the walk ended.
    pub outcome: PathOutcome,
}

impl BreadcrumbTrail {
    /// The trail of the root view.
    pub fn root() -> Self {
        Self {
            entries: Vec::new(),
            outcome: PathOutcome::Complete,
        }
    }

    /// Whether the walk reached a root folder.
    pub fn is_complete(&self) -> bool {
        self.outcome == PathOutcome::Complete
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The innermost entry.
    pub fn current(&self) -> Option<&Breadcrumb> {
        self.entries.last()
    }
}

impl fmt::Display for BreadcrumbTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Home")?;
        if !self.is_complete() {
            f.write_str(" / …")?;
        }
        for entry in &self.entries {
            write!(f, " / {}", entry.name)?;
        }
        Ok(())
    }
}

/// Resolves a folder id into its breadcrumb trail.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Folder lookups.
    api: Arc<dyn DocumentApi>,
    /// Maximum number of folders fetched per walk.
    max_depth: usize,
}

impl PathResolver {
    /// Creates a resolver with the configured hop limit.
    pub fn new(api: Arc<dyn DocumentApi>, config: &NavigationConfig) -> Self {
        Self {
            api,
            max_depth: config.max_breadcrumb_depth.max(1),
        }
    }

    /// Walk from `folder_id` up to the root.
    ///
    /// Fetches are sequential, one per ancestor. Failures never propagate:
    /// the entries resolved so far are returned and the outcome records
    /// where and why the walk stopped.
    pub async fn resolve(&self, folder_id: Option<FolderId>) -> BreadcrumbTrail {
        let mut entries = VecDeque::new();
        let mut visited = HashSet::new();
        let mut next = folder_id;

        let outcome = loop {
            let Some(id) = next else {
                break PathOutcome::Complete;
            };

            if !visited.insert(id) {
                tracing::warn!(folder_id = %id, "Folder parent chain contains a cycle");
                break PathOutcome::CycleDetected { at: id };
            }

            if entries.len() >= self.max_depth {
                tracing::warn!(limit = self.max_depth, "Folder parent chain exceeds depth limit");
                break PathOutcome::DepthExceeded {
                    limit: self.max_depth,
                };
            }

            match self.api.get_folder(id).await {
                Ok(folder) => {
                    next = folder.parent_id;
                    entries.push_front(Breadcrumb::from(&folder));
                }
                Err(e) => {
                    tracing::warn!(folder_id = %id, error = %e, "Breadcrumb lookup failed");
                    break PathOutcome::Truncated { at: id, kind: e.kind };
                }
            }
        };

        BreadcrumbTrail {
            entries: entries.into(),
            outcome,
        }
    }
}
