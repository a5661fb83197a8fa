use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::router::RouteTable;

use super::ServerConfig;

pub type GuardedRouteTable = Arc<RouteTable>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: Catalog,
    pub routes: GuardedRouteTable,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, catalog: Catalog, routes: GuardedRouteTable) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            routes,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedRouteTable {
    fn from_ref(input: &ServerState) -> Self {
        input.routes.clone()
    }
}

impl FromRef<ServerState> for Catalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
