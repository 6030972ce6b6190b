//! # deskfolio-storage
//!
//! Implementations of the [`deskfolio_core::traits::BlobStore`] boundary:
//! a local-disk provider for production and an in-memory provider for
//! tests and demo seeding.

pub mod providers;

pub use providers::local::LocalBlobStore;
pub use providers::memory::MemoryBlobStore;
