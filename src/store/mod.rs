//! Storage backends for workout rows.
//!
//! Both backends answer the same queries; which one runs is decided once at
//! startup from [`StoreBackend`].

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::StoreBackend;
use crate::errors::WorkoutError;
use crate::models::{FilterKind, FilteredEntry, NewWorkout, WorkoutChanges, WorkoutEntry, WorkoutSummary};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Entries logged on `date`, oldest id first.
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<WorkoutEntry>, WorkoutError>;

    /// Stores a new entry and returns its assigned id.
    async fn insert(&self, workout: &NewWorkout) -> Result<i64, WorkoutError>;

    /// Overwrites the entry's columns. Returns `false` when no row has `id`.
    async fn update(&self, id: i64, changes: &WorkoutChanges) -> Result<bool, WorkoutError>;

    /// Number of rows removed, 0 or 1.
    async fn delete(&self, id: i64) -> Result<u64, WorkoutError>;

    async fn get_summary(&self, id: i64) -> Result<Option<WorkoutSummary>, WorkoutError>;

    /// Entries whose `kind` column equals `value`, newest date first.
    async fn filter(&self, kind: FilterKind, value: &str) -> Result<Vec<FilteredEntry>, WorkoutError>;
}

pub async fn open_store(
    backend: &StoreBackend,
) -> Result<Arc<dyn WorkoutStore>, Box<dyn std::error::Error>> {
    match backend {
        StoreBackend::Sqlite { path } => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            info!("using sqlite store at {}", path.display());
            Ok(Arc::new(SqliteStore::open(path).await?))
        }
        StoreBackend::Memory { seed } => {
            info!("using in-memory store (seeded: {seed})");
            let store = if *seed {
                MemoryStore::seeded()
            } else {
                MemoryStore::new()
            };
            Ok(Arc::new(store))
        }
    }
}

/// Ids of every entry sharing a date with a filter match, ascending.
pub(crate) fn sorted_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
