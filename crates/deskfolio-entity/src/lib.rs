//! # deskfolio-entity
//!
//! Domain entity models for the Deskfolio virtual filesystem: the item
//! record, its type taxonomy, and the consolidated mutation policy.

pub mod item;

pub use item::model::{CreateItem, FilesystemItem, ItemType};
pub use item::policy::{self, MutationPolicy};
