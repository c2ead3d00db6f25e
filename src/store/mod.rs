//! Relational store for users, reviews, and game scores.
//!
//! Rows are plain JSON objects. Two backends share one surface: the hosted
//! Supabase (PostgREST) database and a process-local memory store used for
//! development and tests.

pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use crate::config::{Config, StoreBackend};
use serde_json::Value;
use thiserror::Error;

pub type Row = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Reviews,
    GameScores,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Reviews => "reviews",
            Table::GameScores => "game_scores",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("store returned no rows for {0} insert")]
    EmptyInsert(&'static str),
}

pub enum Store {
    Supabase(SupabaseStore),
    Memory(MemoryStore),
}

impl Store {
    /// Build the configured backend. `None` means the database is disabled.
    pub fn from_config(config: &Config) -> anyhow::Result<Option<Self>> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory store");
                Ok(Some(Store::Memory(MemoryStore::new())))
            }
            StoreBackend::Supabase => match (&config.supabase_url, &config.supabase_key) {
                (Some(url), Some(key)) => {
                    let store = SupabaseStore::new(url, key, config.external_timeout)?;
                    tracing::info!("Connected to Supabase at {}", url);
                    Ok(Some(Store::Supabase(store)))
                }
                _ => Ok(None),
            },
        }
    }

    /// Insert one row and return it as stored (with its id).
    pub async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        match self {
            Store::Supabase(store) => store.insert(table, row).await,
            Store::Memory(store) => Ok(store.insert(table, row)),
        }
    }

    /// Rows whose `column` equals `value`, in insertion order.
    pub async fn select_eq(&self, table: Table, column: &str, value: &Value) -> Result<Vec<Row>, StoreError> {
        match self {
            Store::Supabase(store) => store.select_eq(table, column, value).await,
            Store::Memory(store) => Ok(store.select_eq(table, column, value)),
        }
    }

    /// Merge `changes` into matching rows and return the updated rows.
    pub async fn update_eq(
        &self,
        table: Table,
        column: &str,
        value: &Value,
        changes: Row,
    ) -> Result<Vec<Row>, StoreError> {
        match self {
            Store::Supabase(store) => store.update_eq(table, column, value, changes).await,
            Store::Memory(store) => Ok(store.update_eq(table, column, value, changes)),
        }
    }

    /// Up to `limit` rows ordered by `column` descending.
    pub async fn top_by(&self, table: Table, column: &str, limit: usize) -> Result<Vec<Row>, StoreError> {
        match self {
            Store::Supabase(store) => store.top_by(table, column, limit).await,
            Store::Memory(store) => Ok(store.top_by(table, column, limit)),
        }
    }
}

/// Text form used for equality filters: strings unquoted, everything else as JSON.
pub(crate) fn filter_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Current time in RFC 3339, for `created_at` columns.
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
