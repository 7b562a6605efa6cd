//! # vectra-core
//!
//! Core crate for Vectra CRUD. Contains the data-source contract, list
//! parameter and result types, schema records, configuration schemas,
//! storage/notification ports, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Vectra crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
