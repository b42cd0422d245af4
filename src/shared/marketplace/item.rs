//! Item Data Structure
//!
//! Represents a listed clothing item and the payloads used to create one.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Default redemption price of a new listing
pub const DEFAULT_PRICE_POINTS: i64 = 50;

/// Clothing category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 6] = [
        ItemCategory::Tops,
        ItemCategory::Bottoms,
        ItemCategory::Dresses,
        ItemCategory::Outerwear,
        ItemCategory::Shoes,
        ItemCategory::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Tops => "tops",
            ItemCategory::Bottoms => "bottoms",
            ItemCategory::Dresses => "dresses",
            ItemCategory::Outerwear => "outerwear",
            ItemCategory::Shoes => "shoes",
            ItemCategory::Accessories => "accessories",
        }
    }
}

impl Default for ItemCategory {
    fn default() -> Self {
        ItemCategory::Tops
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| SharedError::validation("category", format!("unknown category '{}'", s)))
    }
}

/// Wear condition of an item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ItemCondition {
    pub const ALL: [ItemCondition; 4] = [
        ItemCondition::Excellent,
        ItemCondition::Good,
        ItemCondition::Fair,
        ItemCondition::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::Excellent => "excellent",
            ItemCondition::Good => "good",
            ItemCondition::Fair => "fair",
            ItemCondition::Poor => "poor",
        }
    }
}

impl Default for ItemCondition {
    fn default() -> Self {
        ItemCondition::Good
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCondition {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str() == wanted)
            .ok_or_else(|| SharedError::validation("condition", format!("unknown condition '{}'", s)))
    }
}

/// A listed item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub size: String,
    pub condition: ItemCondition,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image URLs relative to the server root, e.g. `/uploads/<file>`
    #[serde(default)]
    pub images: Vec<String>,
    pub owner_id: Uuid,
    /// Filled in by the catalogue endpoints only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    /// Points required to redeem
    #[serde(default = "default_price")]
    pub price_points: i64,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

fn default_price() -> i64 {
    DEFAULT_PRICE_POINTS
}

fn default_available() -> bool {
    true
}

impl Item {
    /// Whether `user_id` listed this item
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Owner name for display, `"Unknown"` when the backend did not enrich it
    pub fn owner_display(&self) -> &str {
        self.owner_username.as_deref().unwrap_or("Unknown")
    }
}

/// Request body for `POST /items`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub size: String,
    pub condition: ItemCondition,
    pub tags: Vec<String>,
    pub price_points: i64,
}

/// Response of `POST /items/{id}/upload-image`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageUploadResponse {
    pub image_url: String,
}
