//! Navigation session.
//!
//! Tracks the most recent navigation target of one client. If the target
//! changes while a view is still loading, the earlier load runs to completion
//! (and still fills the route's cache) but its result is discarded.
//!
//! The HTTP server is stateless per request and navigates the `RouteTable`
//! directly. `Navigator` is for embedders that drive one client's navigation
//! in-process, where a slow load must not overwrite a newer target.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{Navigation, RouteError, RouteTable};

pub enum NavigationOutcome {
    Arrived(Navigation),
    /// A newer navigation started before this one completed.
    Superseded { path: String },
}

pub struct Navigator {
    table: Arc<RouteTable>,
    generation: AtomicU64,
    current: Mutex<Option<Navigation>>,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            generation: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// The last navigation that completed without being superseded.
    pub fn current(&self) -> Option<Navigation> {
        self.current.lock().unwrap().clone()
    }

    pub async fn navigate(&self, path: &str) -> Result<NavigationOutcome, RouteError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.table.navigate(path).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Navigation to '{}' superseded, discarding result", path);
            return Ok(NavigationOutcome::Superseded {
                path: path.to_string(),
            });
        }

        let navigation = result?;
        *self.current.lock().unwrap() = Some(navigation.clone());
        Ok(NavigationOutcome::Arrived(navigation))
    }
}
