pub mod app;
pub mod docs;
pub mod routes;
pub mod v1;

pub use app::{build_app, cors_layer};
