//! Multi-user to-do list HTTP API.
//!
//! Users register, may upgrade to the pro plan, and manage their own list of
//! todos. Free accounts are limited to a fixed number of todos. All state is
//! held in memory for the lifetime of the process.

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::TodoApiConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::UserStore;
