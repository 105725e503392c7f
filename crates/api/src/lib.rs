//! HTTP API layer for campus.
//!
//! This crate provides the RPC-style moderation API:
//!
//! - **Endpoints**: moderation, administrator management, notifications
//! - **Extractors**: authenticated-user extraction from request extensions
//! - **Middleware**: bearer-token authentication and application state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
