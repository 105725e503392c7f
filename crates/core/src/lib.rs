//! Core business logic for campus.

pub mod services;

pub use services::*;
