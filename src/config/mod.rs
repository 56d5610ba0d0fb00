//! Configuration module
//!
//! Provides types, discovery and loading for `regrid.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
