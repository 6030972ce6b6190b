//! Core type definitions used across the Deskfolio workspace.

pub mod sorting;

pub use sorting::{SortDirection, SortKey};
