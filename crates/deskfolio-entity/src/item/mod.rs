//! Filesystem item entity.

pub mod model;
pub mod policy;
