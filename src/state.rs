use crate::store::DataSource;
use crate::tasks::ViewRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Shared by every interaction handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub views: Arc<ViewRegistry>,
    pub view_ttl: Duration,
}

impl AppState {
    pub fn new(source: Arc<dyn DataSource>, view_ttl: Duration) -> Self {
        Self {
            source,
            views: Arc::new(ViewRegistry::new()),
            view_ttl,
        }
    }
}
