use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::store::Store;

/// Shared handler state: the storage backend behind its trait object and
/// the session table. Cloning is two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, sessions: Arc<SessionStore>) -> Self {
        Self { store, sessions }
    }
}
