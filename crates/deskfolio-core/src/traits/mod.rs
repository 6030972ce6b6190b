//! Trait boundaries implemented by other Deskfolio crates.

pub mod blob;

pub use blob::BlobStore;
