//! Toolbox Server Library
//!
//! A catalog of small developer, text, image and everyday tools, served over
//! HTTP. Each tool's implementation is loaded the first time its route is
//! visited.

pub mod catalog;
pub mod config;
pub mod paths;
pub mod router;
pub mod server;
pub mod views;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, ToolStatus};
pub use router::{Navigator, RouteTable};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
