//! Filesystem service and startup bootstrap.

pub mod bootstrap;
pub mod service;
