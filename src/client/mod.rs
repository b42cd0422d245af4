//! Marketplace Client Module
//!
//! Everything a front end needs to drive the clothing exchange backend,
//! independent of how it is rendered.
//!
//! # Architecture
//!
//! - **`config`** - Layered configuration (defaults, file, environment)
//! - **`api`** - Typed HTTP client, one method per endpoint
//! - **`credential_store`** - SQLite persistence for the bearer credential
//! - **`session`** - Session manager: restore, login, register, logout
//! - **`swap_flow`** - Points-or-offer swap request form
//! - **`listing`** - New listing form with image upload
//! - **`dashboard`** - Own items and swap requests, accept/reject
//! - **`catalogue`** - Featured items, browsing, item detail
//! - **`theme`** - Plain, eco and cyber palettes
//! - **`types`** - Navigation targets and the credential type
//!
//! Session state is never global: flows receive the [`Session`] they act for.
//!
//! # Example
//!
//! ```rust,no_run
//! use rewear::client::{ApiClient, Config, SessionManager};
//! use rewear::client::credential_store::MemoryCredentialStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(Config::load(None)?);
//! let mut sessions = SessionManager::new(api, MemoryCredentialStore::new());
//! sessions.restore().await;
//! sessions.login("ada@example.com", "hunter2").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalogue;
pub mod config;
pub mod credential_store;
pub mod dashboard;
pub mod error;
pub mod listing;
pub mod session;
pub mod swap_flow;
pub mod theme;
pub mod types;

// Re-export commonly used types
pub use api::{ApiClient, Page};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{ClientError, ErrorKind};
pub use listing::{ImageUpload, ListingForm};
pub use session::{Session, SessionManager, SessionState};
pub use swap_flow::{SubmitBlocker, SwapForm};
pub use theme::Theme;
pub use types::{AppView, Credential};
