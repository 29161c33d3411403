//! Mimir Server
//!
//! HTTP dispatcher wiring the intent registry, response pools, and media
//! scan pipeline behind the public route surface.

pub mod app;
pub mod cli;
pub mod responses;
pub mod routes;
pub mod state;

pub use app::{build_app, run_server};
pub use responses::ResponsePool;
pub use state::{AppState, ServerConfig};
