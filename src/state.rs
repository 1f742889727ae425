use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AgentError;
use crate::topology::Node;

/// Shared per-process state, cloned into every handler and the prober.
/// The topology root is guarded by a single read/write lock; no guard is
/// ever held across an await point.
#[derive(Clone)]
pub struct AppState {
    pub root: Arc<RwLock<Node>>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(root: Node, http_client: reqwest::Client) -> Self {
        AppState {
            root: Arc::new(RwLock::new(root)),
            http_client,
        }
    }

    pub fn read_root(&self) -> Result<RwLockReadGuard<'_, Node>, AgentError> {
        self.root.read().map_err(|_| AgentError::LockPoisoned)
    }

    pub fn write_root(&self) -> Result<RwLockWriteGuard<'_, Node>, AgentError> {
        self.root.write().map_err(|_| AgentError::LockPoisoned)
    }
}
