//! HTTP service distributing signed exposure-key export packages.
//!
//! Four endpoints: key submission, package catalog, package download,
//! and a version probe. The export core does the heavy lifting; this
//! crate is configuration, routing, and boundary validation.

pub mod config;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::build_router;
pub use state::AppState;
