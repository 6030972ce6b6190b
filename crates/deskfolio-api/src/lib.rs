//! # deskfolio-api
//!
//! HTTP API layer for Deskfolio built on Axum.
//!
//! Provides the filesystem REST endpoints, health checks, DTOs, and the
//! domain-error to HTTP-status mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
