// src/lookup/table.rs
//! In-memory lookup table, optionally loaded from a JSON file of records.

use super::{LookupRecord, PageLookup};
use crate::error::AppError;
use crate::types::UserEmail;
use std::path::Path;

/// Records held in memory, in file order.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    records: Vec<LookupRecord>,
}

impl LookupTable {
    pub fn new(records: Vec<LookupRecord>) -> Self {
        Self { records }
    }

    /// Loads `[{"email": "...", "pageID": "..."}, ...]` from `path`.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<LookupRecord> =
            serde_json::from_str(&raw).map_err(|source| AppError::JsonParseError {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("Loaded {} lookup records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl PageLookup for LookupTable {
    async fn find_records(&self, user: &UserEmail) -> Result<Vec<LookupRecord>, AppError> {
        Ok(self
            .records
            .iter()
            .filter(|record| user.matches(&record.email))
            .cloned()
            .collect())
    }
}
