//! # hookfile-core
//!
//! Core crate for hookfile. Contains the configuration schemas and the
//! unified error system shared by the hook layer and the CLI.
//!
//! This crate has **no** internal dependencies on other hookfile crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
