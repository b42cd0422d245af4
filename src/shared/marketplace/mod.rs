//! Marketplace Module
//!
//! Wire types for the clothing exchange REST API:
//!
//! - `UserProfile` - the authenticated identity and its points balance
//! - `Item` - a listed piece of clothing
//! - `SwapRequest` - a request to trade for or redeem an item
//!
//! # Usage
//!
//! ```rust
//! use rewear::shared::marketplace::{Item, ItemCategory, SwapRequest, UserProfile};
//! ```

pub mod item;
pub mod swap;
pub mod user;

pub use item::{CreateItemRequest, ImageUploadResponse, Item, ItemCategory, ItemCondition};
pub use swap::{CreateSwapRequest, StatusMessage, SwapAction, SwapMode, SwapRequest, SwapStatus};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};

/// Timestamps as the backend emits them.
///
/// The backend writes naive UTC datetimes (`2024-05-01T10:00:00.123456`), but
/// RFC 3339 values are accepted too. Anything unparseable reads as `None`
/// rather than failing the whole payload.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.naive_utc())
            .ok()
            .or_else(|| raw.parse::<NaiveDateTime>().ok())
    }

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse))
    }

}
