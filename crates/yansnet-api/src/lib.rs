//! YANSNET API
//!
//! HTTP façade for depression detection. Models are registered once at
//! startup into a [`ModelRegistry`](yansnet_models::ModelRegistry), which is
//! then shared read-only with every request through [`AppState`].

pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{LogFormat, Settings};
pub use error::{ApiError, ErrorBody};
pub use server::build_app;
pub use state::AppState;
