//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, cross-cutting layers)
//!     → middleware/ (lookup, quota; each step may end the chain)
//!     → handlers/ (store mutation or query)
//!     → response.rs (errors rendered as { "error": msg })
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{ApiJson, USERNAME_HEADER, X_REQUEST_ID};
pub use response::ErrorBody;
pub use server::{AppState, HttpServer};
