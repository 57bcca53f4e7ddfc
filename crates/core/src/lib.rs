//! Core types and shared functionality for duckparse.
//!
//! This crate provides:
//! - Search result records
//! - Bounded, time-expiring in-memory cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod record;

pub use cache::{BoundedCache, CacheSettings, SearchKey};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use record::{RecordKind, ResultRecord};
