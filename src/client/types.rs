/**
 * Client Types Module
 *
 * Navigation targets of the app and the opaque bearer credential.
 */

use std::fmt;

use uuid::Uuid;

/// Where a flow sends the user next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// Landing page with featured items
    Home,
    Login,
    Register,
    /// Full catalogue
    Browse,
    ItemDetail(Uuid),
    /// New listing form
    AddItem,
    /// Own items plus received and sent swap requests
    Dashboard,
}

impl AppView {
    /// Views that redirect to `Login` without a session
    pub fn requires_auth(&self) -> bool {
        matches!(self, AppView::AddItem | AppView::Dashboard)
    }

    /// Resolve the view actually shown, given whether a session exists.
    ///
    /// Protected views fall back to `Login`; the auth forms forward a signed
    /// in user to the dashboard.
    pub fn resolve(self, authenticated: bool) -> AppView {
        match self {
            view if view.requires_auth() && !authenticated => AppView::Login,
            AppView::Login | AppView::Register if authenticated => AppView::Dashboard,
            view => view,
        }
    }
}

/// Opaque bearer token identifying a session.
///
/// `Debug` and `Display` never print the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for logs and status output
    pub fn masked(&self) -> String {
        let visible: String = self.0.chars().take(6).collect();
        format!("{}…", visible)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
