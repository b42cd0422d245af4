//! # Credential Store
//!
//! Persists the bearer credential between runs so a session survives
//! restarts until an explicit logout or a rejection by the backend.
//!
//! The credential lives in a small SQLite key/value table under the fixed
//! key [`CREDENTIAL_KEY`]. An in-memory store is provided for tests and
//! throwaway sessions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rewear::client::credential_store::{CredentialStore, SqliteCredentialStore};
//! use rewear::client::Credential;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteCredentialStore::open(&SqliteCredentialStore::default_path()).await?;
//! store.save(&Credential::new("token")).await?;
//! assert!(store.load().await?.is_some());
//! store.clear().await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::client::types::Credential;

/// Key the credential is stored under
pub const CREDENTIAL_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential store error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to create state directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persistent slot for the session credential
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    async fn load(&self) -> Result<Option<Credential>, StoreError>;

    async fn save(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Remove the credential; clearing an empty store is not an error
    async fn clear(&self) -> Result<(), StoreError>;
}

/// SQLite-backed credential store
#[derive(Debug, Clone)]
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Open or create the store at `path`
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::debug!("Opened credential store at {}", path.display());
        Self::with_pool(pool).await
    }

    /// Store that lives as long as the process
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // A single connection that is never recycled; the database dies with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(include_str!("schema.sql")).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Platform data directory, falling back to the temp dir
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("rewear");
        path.push("client.db");
        path
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl CredentialStore for SqliteCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM client_state WHERE key = ?")
            .bind(CREDENTIAL_KEY)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row
            .map(|(value,)| value)
            .filter(|value| !value.is_empty())
            .map(Credential::new))
    }

    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO client_state (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(CREDENTIAL_KEY)
        .bind(credential.as_str())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM client_state WHERE key = ?")
            .bind(CREDENTIAL_KEY)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Process-local store without any persistence
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential, as if persisted by an earlier run
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.slot.write().await = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
