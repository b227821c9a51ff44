//! Request extraction.
//!
//! # Responsibilities
//! - Parse JSON bodies, rendering rejections in the API's error shape
//! - Read the `username` header that scopes todo operations
//!
//! # Design Decisions
//! - A missing or non-UTF-8 `username` header resolves to no user, the same
//!   as an unknown username
//! - Request IDs (`x-request-id`) are generated by tower-http in `server.rs`

use axum::extract::FromRequest;
use axum::http::HeaderMap;

use crate::error::ApiError;

/// Header naming the acting user for `/todos` routes.
pub const USERNAME_HEADER: &str = "username";

/// Request/response ID header.
pub const X_REQUEST_ID: &str = "x-request-id";

/// `Json` whose rejection renders as `{ "error": ... }`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// The acting username, if the header is present and readable.
pub fn username_from(headers: &HeaderMap) -> Option<&str> {
    headers.get(USERNAME_HEADER).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_username_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(username_from(&headers), None);

        headers.insert(USERNAME_HEADER, HeaderValue::from_static("alice"));
        assert_eq!(username_from(&headers), Some("alice"));
    }
}
