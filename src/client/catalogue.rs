//! Read-only catalogue views: featured items, paged browsing, item detail.

use uuid::Uuid;

use crate::client::api::{ApiClient, Page};
use crate::client::error::Result;
use crate::client::session::Session;
use crate::client::swap_flow::SwapForm;
use crate::shared::marketplace::Item;

/// Items shown on the landing page
pub const FEATURED_LIMIT: u32 = 6;

pub async fn featured(api: &ApiClient) -> Result<Vec<Item>> {
    api.list_items(Page::first(FEATURED_LIMIT)).await
}

pub async fn browse(api: &ApiClient, page: Page) -> Result<Vec<Item>> {
    api.list_items(page).await
}

/// Everything one user has listed, including items already swapped away
pub async fn closet(api: &ApiClient, user_id: Uuid) -> Result<Vec<Item>> {
    api.user_items(user_id).await
}

/// An item detail view with, for a signed-in viewer, the swap form.
#[derive(Debug, Clone)]
pub struct ItemDetail {
    pub item: Item,
    /// `None` without a session
    pub swap_form: Option<SwapForm>,
}

impl ItemDetail {
    /// Load the item, plus the viewer's own items when signed in.
    ///
    /// Failing to load the viewer's items only leaves the offer list empty.
    pub async fn load(api: &ApiClient, id: Uuid, session: Option<&Session>) -> Result<Self> {
        let item = api.get_item(id).await?;

        let swap_form = match session {
            Some(session) => {
                let mine = match api.my_items(session.credential()).await {
                    Ok(items) => items,
                    Err(e) => {
                        tracing::warn!("[CATALOGUE] Error fetching my items: {}", e);
                        Vec::new()
                    }
                };
                Some(SwapForm::new(item.clone(), mine))
            }
            None => None,
        };

        Ok(Self { item, swap_form })
    }

    /// Whether the signed-in viewer listed this item
    pub fn is_own(&self, session: Option<&Session>) -> bool {
        session.is_some_and(|session| self.item.is_owned_by(session.identity().id))
    }
}
