//! Route table
//!
//! The table is assembled once at startup. Tool routes are derived from the
//! catalog so the two cannot drift apart; `validate` still checks the
//! cross-table invariants for tables assembled by hand.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::{LazyView, LoadState, RouteError, ViewLoader};
use crate::catalog::{Catalog, ToolStatus};
use crate::paths::normalize_path;
use crate::server::metrics::record_route_not_found;
use crate::views::{self, ToolView, ViewLimits};

pub const HOME_ROUTE: &str = "home";
pub const PRO_ROUTE: &str = "pro";
pub const PRO_TITLE: &str = "Pro 版本";

#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

pub enum ViewSource {
    /// Built together with the table.
    Eager(Arc<dyn ToolView>),
    /// Built on first navigation.
    Lazy(LazyView),
}

pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
    source: ViewSource,
}

impl RouteEntry {
    pub fn source(&self) -> &ViewSource {
        &self.source
    }

    pub fn state(&self) -> LoadState {
        match &self.source {
            ViewSource::Eager(_) => LoadState::Loaded,
            ViewSource::Lazy(view) => view.state(),
        }
    }

    pub fn load_count(&self) -> usize {
        match &self.source {
            ViewSource::Eager(_) => 0,
            ViewSource::Lazy(view) => view.load_count(),
        }
    }

    async fn view(&self) -> Result<Arc<dyn ToolView>, RouteError> {
        match &self.source {
            ViewSource::Eager(view) => Ok(view.clone()),
            ViewSource::Lazy(view) => view.get().await.map_err(|source| RouteError::LoadFailed {
                route: self.name.clone(),
                source,
            }),
        }
    }
}

/// Result of a completed navigation.
#[derive(Clone)]
pub struct Navigation {
    pub route: String,
    pub path: String,
    pub title: Option<String>,
    pub view: Arc<dyn ToolView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteStatus {
    pub path: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub state: LoadState,
    pub loads: usize,
}

/// A broken invariant between the catalog and the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableViolation {
    #[error("path '{path}' is bound to more than one route")]
    DuplicateRoutePath { path: String },

    #[error("route name '{name}' is used more than once")]
    DuplicateRouteName { name: String },

    #[error("path '{path}' is used by more than one catalog tool")]
    DuplicateToolPath { path: String },

    #[error("category id '{id}' is used more than once")]
    DuplicateCategoryId { id: String },

    #[error("developed tool '{path}' has no route")]
    MissingRoute { path: String },
}

pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Builds the table for a catalog: `/` (home), `/pro`, then one route
    /// per tool that has a view.
    pub fn from_catalog(
        catalog: Catalog,
        limits: &ViewLimits,
        load_timeout: Option<Duration>,
    ) -> RouteTable {
        let mut builder = RouteTable::builder()
            .load_timeout(load_timeout)
            .eager("/", HOME_ROUTE, None, views::home_view(catalog))
            .lazy("/pro", PRO_ROUTE, Some(PRO_TITLE), views::pro_loader());

        for tool in catalog.tools() {
            match views::loader_for_tool(tool.path, tool.name, tool.status, limits) {
                Some(loader) => {
                    builder = builder.lazy(tool.path, tool.route_name(), Some(tool.name), loader);
                }
                None => warn!("No view available for tool '{}' ({})", tool.name, tool.path),
            }
        }
        builder.build()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn get_by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn resolve(&self, path: &str) -> Result<&RouteEntry, RouteError> {
        let normalized = normalize_path(path);
        match self.by_path.get(&normalized) {
            Some(index) => Ok(&self.entries[*index]),
            None => {
                debug!("No route for '{}'", normalized);
                record_route_not_found();
                Err(RouteError::NotFound { path: normalized })
            }
        }
    }

    /// Resolves `path` and waits for its view to be available.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, RouteError> {
        let entry = self.resolve(path)?;
        let view = entry.view().await?;
        Ok(Navigation {
            route: entry.name.clone(),
            path: entry.path.clone(),
            title: entry.meta.title.clone(),
            view,
        })
    }

    pub fn statuses(&self) -> Vec<RouteStatus> {
        self.entries
            .iter()
            .map(|entry| RouteStatus {
                path: entry.path.clone(),
                name: entry.name.clone(),
                title: entry.meta.title.clone(),
                state: entry.state(),
                loads: entry.load_count(),
            })
            .collect()
    }

    /// Checks the invariants shared with `catalog`. Returns every violation
    /// found, or an empty list.
    pub fn validate(&self, catalog: &Catalog) -> Vec<TableViolation> {
        let mut violations = Vec::new();

        let mut seen_paths = HashSet::new();
        let mut seen_names = HashSet::new();
        for entry in &self.entries {
            if !seen_paths.insert(entry.path.as_str()) {
                violations.push(TableViolation::DuplicateRoutePath {
                    path: entry.path.clone(),
                });
            }
            if !seen_names.insert(entry.name.as_str()) {
                violations.push(TableViolation::DuplicateRouteName {
                    name: entry.name.clone(),
                });
            }
        }

        let mut seen_ids = HashSet::new();
        for category in catalog.categories() {
            if !seen_ids.insert(category.id) {
                violations.push(TableViolation::DuplicateCategoryId {
                    id: category.id.to_string(),
                });
            }
        }

        let mut tool_paths = HashSet::new();
        for tool in catalog.tools() {
            let path = normalize_path(tool.path);
            if !tool_paths.insert(path.clone()) {
                violations.push(TableViolation::DuplicateToolPath { path: path.clone() });
            }
            if tool.status == ToolStatus::Developed
                && !self.entries.iter().any(|entry| entry.path == path)
            {
                violations.push(TableViolation::MissingRoute { path });
            }
        }

        violations
    }
}

#[derive(Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
    load_timeout: Option<Duration>,
}

impl RouteTableBuilder {
    /// Timeout applied to lazy routes added after this call.
    pub fn load_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.load_timeout = timeout;
        self
    }

    pub fn eager(
        mut self,
        path: &str,
        name: &str,
        title: Option<&str>,
        view: Arc<dyn ToolView>,
    ) -> Self {
        self.entries.push(RouteEntry {
            path: normalize_path(path),
            name: name.to_string(),
            meta: RouteMeta {
                title: title.map(str::to_string),
            },
            source: ViewSource::Eager(view),
        });
        self
    }

    pub fn lazy(mut self, path: &str, name: &str, title: Option<&str>, loader: ViewLoader) -> Self {
        self.entries.push(RouteEntry {
            path: normalize_path(path),
            name: name.to_string(),
            meta: RouteMeta {
                title: title.map(str::to_string),
            },
            source: ViewSource::Lazy(LazyView::new(name, loader, self.load_timeout)),
        });
        self
    }

    /// Builds the table. When two entries share a path the first one wins;
    /// `RouteTable::validate` reports the collision.
    pub fn build(self) -> RouteTable {
        let mut by_path = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            by_path.entry(entry.path.clone()).or_insert(index);
        }
        RouteTable {
            entries: self.entries,
            by_path,
        }
    }
}
