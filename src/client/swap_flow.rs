//! Swap Request Flow
//!
//! State behind the "request this item" panel of an item detail view. The
//! viewer picks either points redemption or an item offer; submission stays
//! disabled until the chosen mode is satisfiable.
//!
//! ```rust
//! # use rewear::client::swap_flow::{SwapForm, SubmitBlocker};
//! # fn demo(form: &mut SwapForm, viewer: &rewear::shared::UserProfile) {
//! form.select_points();
//! if let Some(SubmitBlocker::InsufficientPoints { missing, .. }) = form.blocker(viewer) {
//!     println!("{} more points needed", missing);
//! }
//! # }
//! ```

use std::fmt;

use uuid::Uuid;

use crate::client::api::ApiClient;
use crate::client::error::Result;
use crate::client::session::Session;
use crate::client::types::AppView;
use crate::shared::marketplace::{CreateSwapRequest, Item, SwapMode, SwapRequest, UserProfile};
use crate::shared::SharedError;

/// Message shown when a submission fails without backend detail
pub const SUBMIT_FALLBACK: &str = "Error sending swap request";

/// Why the form cannot be submitted right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocker {
    /// The viewer listed this item
    OwnItem,
    /// The item has already been swapped away
    Unavailable,
    /// Points mode with a balance below the price
    InsufficientPoints { price: i64, balance: i64, missing: i64 },
    /// Offer mode with nothing chosen to offer
    NoOfferedItem,
}

impl fmt::Display for SubmitBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitBlocker::OwnItem => f.write_str("This is your item"),
            SubmitBlocker::Unavailable => f.write_str("This item is no longer available"),
            SubmitBlocker::InsufficientPoints { .. } => f.write_str("Insufficient points"),
            SubmitBlocker::NoOfferedItem => f.write_str("Select an item to offer"),
        }
    }
}

/// Form state for requesting one item
#[derive(Debug, Clone)]
pub struct SwapForm {
    item: Item,
    offerable: Vec<Item>,
    mode: SwapMode,
    offered_item: Option<Uuid>,
    message: String,
    error: Option<String>,
}

impl SwapForm {
    /// Build the form for `item`. Only the viewer's available items other
    /// than `item` itself can be offered.
    pub fn new(item: Item, viewer_items: Vec<Item>) -> Self {
        let offerable = viewer_items
            .into_iter()
            .filter(|candidate| candidate.available && candidate.id != item.id)
            .collect();

        Self {
            item,
            offerable,
            mode: SwapMode::default(),
            offered_item: None,
            message: String::new(),
            error: None,
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Items the viewer may put up in exchange
    pub fn offerable(&self) -> &[Item] {
        &self.offerable
    }

    pub fn mode(&self) -> SwapMode {
        self.mode
    }

    pub fn offered_item(&self) -> Option<&Item> {
        let id = self.offered_item?;
        self.offerable.iter().find(|item| item.id == id)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Last submission error, kept until the next attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch to points redemption; any chosen offer is dropped
    pub fn select_points(&mut self) {
        self.mode = SwapMode::Points;
        self.offered_item = None;
    }

    pub fn select_offer(&mut self) {
        self.mode = SwapMode::ItemOffer;
    }

    /// Choose the item to offer; it must be one of [`offerable`](Self::offerable)
    pub fn choose_offered_item(&mut self, id: Uuid) -> std::result::Result<(), SharedError> {
        if !self.offerable.iter().any(|item| item.id == id) {
            return Err(SharedError::validation(
                "offered_item_id",
                "You can only offer one of your own available items",
            ));
        }
        self.mode = SwapMode::ItemOffer;
        self.offered_item = Some(id);
        Ok(())
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// First reason the viewer cannot submit, if any
    pub fn blocker(&self, viewer: &UserProfile) -> Option<SubmitBlocker> {
        if self.item.is_owned_by(viewer.id) {
            return Some(SubmitBlocker::OwnItem);
        }
        if !self.item.available {
            return Some(SubmitBlocker::Unavailable);
        }
        match self.mode {
            SwapMode::Points if !viewer.can_afford(self.item.price_points) => {
                Some(SubmitBlocker::InsufficientPoints {
                    price: self.item.price_points,
                    balance: viewer.points,
                    missing: self.item.price_points - viewer.points,
                })
            }
            SwapMode::ItemOffer if self.offered_item.is_none() => Some(SubmitBlocker::NoOfferedItem),
            _ => None,
        }
    }

    pub fn can_submit(&self, viewer: &UserProfile) -> bool {
        self.blocker(viewer).is_none()
    }

    /// The request body, or the blocker as a validation error
    pub fn to_request(&self, viewer: &UserProfile) -> std::result::Result<CreateSwapRequest, SharedError> {
        if let Some(blocker) = self.blocker(viewer) {
            let field = match blocker {
                SubmitBlocker::NoOfferedItem => "offered_item_id",
                SubmitBlocker::InsufficientPoints { .. } => "is_points_request",
                SubmitBlocker::OwnItem | SubmitBlocker::Unavailable => "item_id",
            };
            return Err(SharedError::validation(field, blocker.to_string()));
        }

        let message = self.message.trim();
        Ok(CreateSwapRequest {
            item_id: self.item.id,
            offered_item_id: match self.mode {
                SwapMode::ItemOffer => self.offered_item,
                SwapMode::Points => None,
            },
            is_points_request: self.mode.is_points(),
            message: if message.is_empty() { None } else { Some(message.to_string()) },
        })
    }

    /// Send the request.
    ///
    /// On success the viewer goes to the dashboard, where sent requests are
    /// listed. On failure the backend's message is kept in
    /// [`error`](Self::error) and the form is left as filled in.
    pub async fn submit(&mut self, api: &ApiClient, session: &Session) -> Result<(SwapRequest, AppView)> {
        self.error = None;

        let request = match self.to_request(session.identity()) {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.message().to_string());
                return Err(e.into());
            }
        };

        match api.create_swap(session.credential(), &request).await {
            Ok(created) => {
                tracing::info!(
                    "[SWAP] Requested '{}' ({})",
                    self.item.title,
                    if request.is_points_request { "points" } else { "offer" }
                );
                Ok((created, AppView::Dashboard))
            }
            Err(e) => {
                tracing::warn!("[SWAP] Request for '{}' failed: {}", self.item.title, e);
                self.error = Some(e.user_message(SUBMIT_FALLBACK));
                Err(e)
            }
        }
    }
}
