//! Application state shared across handlers

use common::Documents;
use std::{path::PathBuf, sync::Arc};

use crate::{
    credentials::CredentialScheme,
    repositories::{CartRepository, UserRepository},
    session::SessionManager,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub sessions: SessionManager,
    pub cart_repository: CartRepository,
    /// Directory served as static files
    pub public_dir: PathBuf,
    /// Directory holding the session-gated pages
    pub pages_dir: PathBuf,
}

impl AppState {
    /// Wire the repositories over one document layer
    pub fn new(
        documents: Documents,
        credentials: Arc<dyn CredentialScheme>,
        public_dir: PathBuf,
        pages_dir: PathBuf,
    ) -> Self {
        Self {
            user_repository: UserRepository::new(documents.clone(), credentials),
            sessions: SessionManager::new(documents.clone()),
            cart_repository: CartRepository::new(documents),
            public_dir,
            pages_dir,
        }
    }
}
