//! DashTalent - admin backend for the talent catalog
//!
//! Clean architecture REST API built with Axum and SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core catalog entities and field rules
//! - **events**: Realtime registration events and the activity feed
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, photo storage)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Genero, Talent};
pub use errors::{AppError, AppResult};
