//! Server state shared across requests

use parley_core::Directory;
use std::sync::Arc;

/// Shared handle to the directory service
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
}

impl AppState {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }
}
