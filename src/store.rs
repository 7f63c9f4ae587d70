use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::metadata::{CompetitionId, CompetitionMeta};
use crate::sheet_handler::SheetContent;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Cached state of one competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(flatten)]
    pub meta: CompetitionMeta,
    pub sheet: Option<SheetContent>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A record without its sheet, for listing views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSummary {
    #[serde(flatten)]
    pub meta: CompetitionMeta,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CacheRecord> for CompetitionSummary {
    fn from(record: CacheRecord) -> Self {
        Self {
            meta: record.meta,
            updated_at: record.updated_at,
        }
    }
}

pub type Records = HashMap<CompetitionId, CacheRecord>;

// ============================================================================
// STORE
// ============================================================================

/// Records keyed by competition id behind a single lock.
/// Reads hand out copies; writes commit a whole batch under one lock acquisition.
#[derive(Debug, Default)]
pub struct CacheStore {
    records: Mutex<Records>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every record
    pub fn snapshot_all(&self) -> Records {
        self.lock().clone()
    }

    /// Copy of one record, if cached
    pub fn snapshot_one(&self, id: CompetitionId) -> Option<CacheRecord> {
        self.lock().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Replaces every record present in `batch`; other ids are left as they are
    pub fn merge_full(&self, batch: Records) {
        let mut records = self.lock();
        records.extend(batch);
    }

    /// Overwrites only `sheet` and `updated_at` for each of `ids` already in the store.
    /// An id without an entry in `sheets` gets a `None` sheet; unknown ids are not added.
    pub fn merge_partial(
        &self,
        ids: &[CompetitionId],
        mut sheets: HashMap<CompetitionId, Option<SheetContent>>,
        timestamp: DateTime<Utc>,
    ) {
        let mut records = self.lock();
        for id in ids {
            if let Some(record) = records.get_mut(id) {
                record.sheet = sheets.remove(id).flatten();
                record.updated_at = Some(timestamp);
            }
        }
    }
}
