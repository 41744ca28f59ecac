use mcpdex_core::Directory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    directory: Arc<dyn Directory>,
}

impl AppState {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &dyn Directory {
        self.directory.as_ref()
    }
}
