//! Resolve-once view cache for a single route.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use super::{LoadError, ViewLoader};
use crate::server::metrics::record_view_load;
use crate::views::ToolView;

/// Load state of a route's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Unrequested,
    Loading,
    Loaded,
    Failed,
}

/// A view that is built on first use and then reused.
///
/// Concurrent first requests share a single load. A failed load leaves the
/// cache empty, so the next request starts over.
pub struct LazyView {
    route: String,
    loader: ViewLoader,
    timeout: Option<Duration>,
    cell: OnceCell<Arc<dyn ToolView>>,
    state: Mutex<LoadState>,
    loads: AtomicUsize,
}

impl LazyView {
    pub fn new(route: impl Into<String>, loader: ViewLoader, timeout: Option<Duration>) -> Self {
        Self {
            route: route.into(),
            loader,
            timeout,
            cell: OnceCell::new(),
            state: Mutex::new(LoadState::Unrequested),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> LoadState {
        *self.state.lock().unwrap()
    }

    /// Number of times the loader has been invoked.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub async fn get(&self) -> Result<Arc<dyn ToolView>, LoadError> {
        if let Some(view) = self.cell.get() {
            debug!("View for route '{}' served from cache", self.route);
            return Ok(view.clone());
        }
        let view = self.cell.get_or_try_init(|| self.load()).await?;
        Ok(view.clone())
    }

    async fn load(&self) -> Result<Arc<dyn ToolView>, LoadError> {
        self.set_state(LoadState::Loading);
        self.loads.fetch_add(1, Ordering::SeqCst);
        info!("Loading view for route '{}'", self.route);

        let start = Instant::now();
        let pending = (self.loader)();
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(result) => result,
                Err(_) => Err(LoadError::TimedOut(limit)),
            },
            None => pending.await,
        };
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => {
                self.set_state(LoadState::Loaded);
                record_view_load(&self.route, "loaded", elapsed);
                debug!(
                    "View for route '{}' loaded in {}ms",
                    self.route,
                    elapsed.as_millis()
                );
            }
            Err(err) => {
                self.set_state(LoadState::Failed);
                record_view_load(&self.route, "failed", elapsed);
                error!("Failed to load view for route '{}': {}", self.route, err);
            }
        }
        result
    }

    fn set_state(&self, state: LoadState) {
        *self.state.lock().unwrap() = state;
    }
}
