//! Async client for the to-do API.

pub mod client;

pub use client::{ClientError, Todo, TodoClient, User};
