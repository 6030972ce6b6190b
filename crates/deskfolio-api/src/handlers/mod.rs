//! HTTP request handlers.

pub mod filesystem;
pub mod health;
