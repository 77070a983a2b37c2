//! HTTP request handlers.

pub mod dashboard_handler;
pub mod talent_handler;

pub use dashboard_handler::dashboard_routes;
pub use talent_handler::talent_routes;
