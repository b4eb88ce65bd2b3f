//! Shared error types and configuration for Corebank.
//!
//! This crate provides the pieces used across all other crates:
//! - Application-wide error taxonomy with HTTP mappings
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AccrualConfig, AppConfig, DatabaseConfig, ServerConfig};
pub use error::{AppError, AppResult};
