//! # deskfolio-core
//!
//! Core crate for Deskfolio. Contains the unified error system, path
//! utilities, configuration schemas, sorting types, and the blob-store
//! trait boundary.
//!
//! This crate has **no** internal dependencies on other Deskfolio crates.

pub mod config;
pub mod error;
pub mod path;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
