//! # Classify Common Library
//!
//! Shared code for the classify catalog services including:
//! - Configuration loading (TOML file, data/config directory defaults)
//! - Database bootstrap and the books table schema
//! - Common error types

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;

pub use error::{Error, Result};
