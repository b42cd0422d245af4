//! ReWear - Clothing Exchange Client
//!
//! Client library for a peer-to-peer clothing exchange: list items, browse
//! the catalogue, request swaps (item for item, or redeemed with points)
//! and answer the requests other users send.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types for the REST API, validation errors and the
//!   base configuration builder
//!
//! - **`client`** - Everything that talks to the backend or holds client
//!   state
//!   - Typed API client over `reqwest`
//!   - Session manager with a persisted bearer credential (SQLite via `sqlx`)
//!   - Swap request, listing and dashboard flows
//!   - Theme palettes
//!
//! # Feature Flags
//!
//! - **`cli`** (default) - builds the `rewear` command-line front end
//!
//! # Usage
//!
//! ```rust,no_run
//! use rewear::client::credential_store::SqliteCredentialStore;
//! use rewear::client::{ApiClient, Config, Dashboard, SessionManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! let store = SqliteCredentialStore::open(&config.state_db_path()).await?;
//! let mut sessions = SessionManager::new(ApiClient::new(config), store);
//!
//! sessions.restore().await;
//! if let Some(session) = sessions.session() {
//!     let dashboard = Dashboard::load(sessions.api(), session).await;
//!     println!("{} items listed", dashboard.my_items.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for local validation
//! - `client::ClientError` for everything involving the backend or local state
//! - `shared::ConfigError` for configuration

/// Wire types and shared data structures
pub mod shared;

/// Backend client, session and UI flows
pub mod client;
