//! The current folder view and protection against stale responses.
//!
//! Every navigation takes a new generation token. A load that finishes
//! after a newer navigation has started is discarded instead of being
//! applied, so the view always shows the most recently requested folder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use securedocs_client::DocumentApi;
use securedocs_core::config::NavigationConfig;
use securedocs_core::error::AppError;
use securedocs_core::result::AppResult;
use securedocs_core::types::FolderId;

use super::listing::{ContentLister, FolderContents};
use super::path::{BreadcrumbTrail, PathResolver};

/// Identifies one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationToken(u64);

impl NavigationToken {
    /// The generation number.
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// A fully loaded folder view.
#[derive(Debug, Clone, Serialize)]
pub struct FolderView {
    /// The shown folder; `None` is the root.
    pub folder_id: Option<FolderId>,
    /// Path from the root to the folder.
    pub breadcrumbs: BreadcrumbTrail,
    /// The folder's children.
    pub contents: FolderContents,
}

/// What the view currently shows.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A navigation is in flight.
    Loading {
        folder_id: Option<FolderId>,
        token: NavigationToken,
    },
    /// The folder loaded.
    Ready(FolderView),
    /// Loading the folder failed.
    Failed {
        folder_id: Option<FolderId>,
        error: AppError,
    },
}

impl ViewState {
    /// The folder the state refers to.
    pub fn folder_id(&self) -> Option<FolderId> {
        match self {
            Self::Idle => None,
            Self::Loading { folder_id, .. } | Self::Failed { folder_id, .. } => *folder_id,
            Self::Ready(view) => view.folder_id,
        }
    }

    /// Whether a navigation is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Loads folder views and keeps only the latest one.
#[derive(Debug)]
pub struct Navigator {
    resolver: PathResolver,
    lister: ContentLister,
    generation: AtomicU64,
    state: RwLock<ViewState>,
}

impl Navigator {
    /// Creates a navigator over `api`.
    pub fn new(api: Arc<dyn DocumentApi>, config: &NavigationConfig) -> Self {
        Self {
            resolver: PathResolver::new(api.clone(), config),
            lister: ContentLister::new(api, config),
            generation: AtomicU64::new(0),
            state: RwLock::new(ViewState::Idle),
        }
    }

    /// Start a navigation, superseding any in flight.
    pub async fn begin(&self, folder_id: Option<FolderId>) -> NavigationToken {
        // The counter moves under the write guard so `Loading` states are
        // stored in token order.
        let mut state = self.state.write().await;
        let token = NavigationToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
        *state = ViewState::Loading { folder_id, token };
        token
    }

    /// Whether `token` belongs to the latest navigation.
    pub fn is_current(&self, token: NavigationToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Load `folder_id` without touching the view.
    pub async fn load(&self, folder_id: Option<FolderId>) -> AppResult<FolderView> {
        let (contents, breadcrumbs) =
            tokio::join!(self.lister.list(folder_id), self.resolver.resolve(folder_id));
        Ok(FolderView {
            folder_id,
            breadcrumbs,
            contents: contents?,
        })
    }

    /// Apply a finished load if `token` is still current.
    ///
    /// Returns `false` when the result was stale and discarded.
    pub async fn apply(
        &self,
        token: NavigationToken,
        folder_id: Option<FolderId>,
        result: &AppResult<FolderView>,
    ) -> bool {
        let mut state = self.state.write().await;
        if !self.is_current(token) {
            tracing::debug!(
                generation = token.0,
                folder_id = ?folder_id,
                "Discarding stale navigation result"
            );
            return false;
        }

        *state = match result {
            Ok(view) => ViewState::Ready(view.clone()),
            Err(error) => {
                tracing::warn!(folder_id = ?folder_id, error = %error, "Failed to load folder");
                ViewState::Failed {
                    folder_id,
                    error: error.clone(),
                }
            }
        };
        true
    }

    /// Navigate to `folder_id`.
    ///
    /// Returns `Ok(None)` when a newer navigation superseded this one
    /// before it finished; its result, success or failure, is dropped.
    pub async fn navigate(&self, folder_id: Option<FolderId>) -> AppResult<Option<FolderView>> {
        let token = self.begin(folder_id).await;
        let result = self.load(folder_id).await;
        if self.apply(token, folder_id, &result).await {
            result.map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reload the folder currently shown.
    pub async fn refresh(&self) -> AppResult<Option<FolderView>> {
        let folder_id = self.state.read().await.folder_id();
        self.navigate(folder_id).await
    }

    /// A snapshot of the view.
    pub async fn state(&self) -> ViewState {
        self.state.read().await.clone()
    }
}
