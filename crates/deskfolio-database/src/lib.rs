//! # deskfolio-database
//!
//! SQLite connection management, migrations, and the path-indexed item
//! repository.

pub mod connection;
pub mod migration;
pub mod repositories;
