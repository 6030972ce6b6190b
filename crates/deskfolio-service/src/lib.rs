//! # deskfolio-service
//!
//! Business logic for the virtual filesystem: listing, upload, synthetic
//! creation, rename/move/reassign, cascade delete, and startup seeding of
//! the protected root folders.

pub mod filesystem;

pub use filesystem::service::{FilesystemService, FolderListing, UpdateFileRequest};
