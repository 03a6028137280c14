// src/lookup/mod.rs
//! Page lookup: which Notion page belongs to which user.
//!
//! Backends only return candidate records. Matching and tie-breaking live in
//! `resolve_page_id`.

mod postgrest;
mod table;

pub use postgrest::PostgrestLookupTable;
pub use table::LookupTable;

use crate::error::AppError;
use crate::types::{PageId, UserEmail};
use serde::{Deserialize, Serialize};

/// One stored association between a user and a Notion page, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub email: String,
    /// Raw ID, dashed UUID, or notion.so URL.
    #[serde(rename = "pageID", alias = "page_id")]
    pub page_id: String,
}

impl LookupRecord {
    pub fn new(email: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            page_id: page_id.into(),
        }
    }
}

/// A store that can list the records associated with a user.
#[async_trait::async_trait]
pub trait PageLookup: Send + Sync {
    /// Returns candidate records for `user`, in whatever order the store
    /// produces. Backends may over-match; results are filtered again.
    async fn find_records(&self, user: &UserEmail) -> Result<Vec<LookupRecord>, AppError>;
}

/// Resolves the caller's page.
///
/// Zero usable records is `NotFound`. With `requested`, that page must be
/// one of the caller's records. Otherwise the lexicographically smallest
/// normalized page ID wins, so the answer never depends on store order.
pub async fn resolve_page_id(
    lookup: &dyn PageLookup,
    user: &UserEmail,
    requested: Option<&PageId>,
) -> Result<PageId, AppError> {
    let records = lookup.find_records(user).await?;
    let mut candidates = usable_page_ids(user, records);

    if candidates.is_empty() {
        return Err(AppError::NotFound {
            user: user.to_string(),
        });
    }

    if let Some(requested) = requested {
        return if candidates.contains(requested) {
            Ok(requested.clone())
        } else {
            log::warn!("{} requested page {} which is not linked to them", user, requested);
            Err(AppError::NotFound {
                user: user.to_string(),
            })
        };
    }

    candidates.sort();
    candidates.dedup();
    if candidates.len() > 1 {
        log::warn!(
            "{} has {} linked pages; using {}",
            user,
            candidates.len(),
            candidates[0]
        );
    }
    Ok(candidates.swap_remove(0))
}

fn usable_page_ids(user: &UserEmail, records: Vec<LookupRecord>) -> Vec<PageId> {
    records
        .into_iter()
        .filter(|record| user.matches(&record.email))
        .filter_map(|record| match PageId::parse(&record.page_id) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Skipping lookup record for {} with bad page id: {}", user, e);
                None
            }
        })
        .collect()
}
