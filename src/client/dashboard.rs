//! Dashboard
//!
//! The signed-in user's own listings plus the swap requests they received
//! and sent. The three reads go out together and fail independently: a
//! section whose call failed is shown empty and listed in `failures`.

use std::fmt;

use futures_util::future::join3;
use uuid::Uuid;

use crate::client::api::ApiClient;
use crate::client::error::{ClientError, Result};
use crate::client::session::Session;
use crate::shared::marketplace::{Item, StatusMessage, SwapAction, SwapRequest};
use crate::shared::SharedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardSection {
    MyItems,
    Received,
    Sent,
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DashboardSection::MyItems => "my items",
            DashboardSection::Received => "received requests",
            DashboardSection::Sent => "sent requests",
        })
    }
}

/// One section that could not be loaded
#[derive(Debug)]
pub struct SectionFailure {
    pub section: DashboardSection,
    pub error: ClientError,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub my_items: Vec<Item>,
    pub received: Vec<SwapRequest>,
    pub sent: Vec<SwapRequest>,
    pub failures: Vec<SectionFailure>,
}

impl Dashboard {
    /// Fetch all three sections concurrently
    pub async fn load(api: &ApiClient, session: &Session) -> Self {
        let credential = session.credential();
        let (items, received, sent) = join3(
            api.my_items(credential),
            api.received_swaps(credential),
            api.sent_swaps(credential),
        )
        .await;

        let mut dashboard = Dashboard::default();
        let my_items = dashboard.take(DashboardSection::MyItems, items);
        let received = dashboard.take(DashboardSection::Received, received);
        let sent = dashboard.take(DashboardSection::Sent, sent);
        Dashboard {
            my_items,
            received,
            sent,
            ..dashboard
        }
    }

    fn take<T: Default>(&mut self, section: DashboardSection, result: Result<T>) -> T {
        match result {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!("[DASHBOARD] Error fetching {}: {}", section, error);
                self.failures.push(SectionFailure { section, error });
                T::default()
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, section: DashboardSection) -> bool {
        self.failures.iter().any(|failure| failure.section == section)
    }

    /// Any section failed because the credential was refused
    pub fn credential_rejected(&self) -> bool {
        self.failures.iter().any(|failure| failure.error.is_credential_rejected())
    }

    /// Errors of every failed section, for session bookkeeping
    pub fn errors(&self) -> impl Iterator<Item = &ClientError> {
        self.failures.iter().map(|failure| &failure.error)
    }

    fn take_failure(&mut self, section: DashboardSection) -> Option<ClientError> {
        let index = self.failures.iter().position(|failure| failure.section == section)?;
        Some(self.failures.remove(index).error)
    }

    /// Received requests the owner can still answer
    pub fn actionable(&self) -> impl Iterator<Item = &SwapRequest> {
        self.received.iter().filter(|swap| swap.is_pending())
    }

    /// Accept or reject a received request, then reload every section.
    ///
    /// Only pending requests listed under `received` can be answered. If
    /// that section failed to load, its error is handed back instead.
    pub async fn respond(
        &mut self,
        api: &ApiClient,
        session: &Session,
        swap_id: Uuid,
        action: SwapAction,
    ) -> Result<StatusMessage> {
        if let Some(error) = self.take_failure(DashboardSection::Received) {
            return Err(error);
        }
        if !self.actionable().any(|swap| swap.id == swap_id) {
            return Err(SharedError::validation("swap_id", "Swap request is not pending").into());
        }

        let ack = api
            .respond_to_swap(session.credential(), swap_id, action)
            .await
            .map_err(|e| {
                tracing::warn!("[DASHBOARD] Error {}ing swap {}: {}", action.path_segment(), swap_id, e);
                e
            })?;

        *self = Dashboard::load(api, session).await;
        Ok(ack)
    }
}
