//! In-memory, request-level cache for search results.
//!
//! This module provides a bounded, time-expiring cache that sits in front of
//! the network fetch. It supports:
//!
//! - Per-entry TTL checked lazily on lookup (no background sweeping)
//! - A fixed maximum entry count with oldest-insertion eviction
//! - Composite (query, region) keys with query normalization
//!
//! Each cache is an owned value built from [`CacheSettings`]; independent
//! instances never share state.

pub mod bounded;
pub mod key;

pub use bounded::{BoundedCache, CacheSettings};
pub use key::SearchKey;
