//! Server application state management

use naming::NamingStrategy;
use std::sync::Arc;
use storage::Storage;

/// Immutable state shared by every request handler
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub naming: NamingStrategy,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, naming: NamingStrategy) -> Self {
        Self { storage, naming }
    }
}
