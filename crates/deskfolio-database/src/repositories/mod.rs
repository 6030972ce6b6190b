//! Repository implementations.

pub mod item;
