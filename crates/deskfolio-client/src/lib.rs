//! # deskfolio-client
//!
//! Client-side navigation layer: a source-agnostic item provider trait,
//! an adapter over the filesystem service, and the Finder state machine
//! with history, sorting, selection, and stale-response protection.

pub mod adapter;
pub mod finder;

pub use adapter::{FinderItem, FinderListing, ItemSource, ServiceAdapter};
pub use finder::{Finder, FinderState, ViewMode};
