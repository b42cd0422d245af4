//! Swap Request Data Structure
//!
//! A swap request asks an item's owner either to accept points for it or to
//! trade it for one of the requester's own items.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a swap request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    /// Waiting for the owner to answer
    Pending,
    /// Owner accepted; items and points have moved
    Accepted,
    /// Owner turned the request down. The backend calls this `cancelled`.
    #[serde(alias = "cancelled")]
    Rejected,
    Completed,
}

impl Default for SwapStatus {
    fn default() -> Self {
        SwapStatus::Pending
    }
}

impl SwapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the requester intends to pay for the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapMode {
    /// Redeem with points
    Points,
    /// Offer one of the requester's items in exchange
    ItemOffer,
}

impl Default for SwapMode {
    fn default() -> Self {
        SwapMode::ItemOffer
    }
}

impl SwapMode {
    pub fn is_points(&self) -> bool {
        matches!(self, SwapMode::Points)
    }
}

/// A swap request as listed by `/swaps/received` and `/swaps/sent`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwapRequest {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub item_id: Uuid,
    pub owner_id: Uuid,
    #[serde(default)]
    pub offered_item_id: Option<Uuid>,
    #[serde(default)]
    pub is_points_request: bool,
    #[serde(default)]
    pub status: SwapStatus,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offered_item_title: Option<String>,
}

impl SwapRequest {
    pub fn mode(&self) -> SwapMode {
        if self.is_points_request {
            SwapMode::Points
        } else {
            SwapMode::ItemOffer
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == SwapStatus::Pending
    }

    /// Title of the requested item, `"Unknown"` when not enriched
    pub fn item_display(&self) -> &str {
        self.item_title.as_deref().unwrap_or("Unknown")
    }
}

/// Request body for `POST /swaps`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSwapRequest {
    pub item_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_item_id: Option<Uuid>,
    pub is_points_request: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Owner's answer to a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    Accept,
    Reject,
}

impl SwapAction {
    /// Path segment of the status-transition endpoint
    pub fn path_segment(&self) -> &'static str {
        match self {
            SwapAction::Accept => "accept",
            SwapAction::Reject => "reject",
        }
    }
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
}
