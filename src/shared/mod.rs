//! Shared Module
//!
//! Types that describe the marketplace API on the wire, plus the error and
//! configuration types that do not depend on any transport.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Users, items and swap requests
pub mod marketplace;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use marketplace::{Item, ItemCategory, ItemCondition, SwapMode, SwapRequest, SwapStatus, UserProfile};
