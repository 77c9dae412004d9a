//! Lookup Models
//!
//! Closed reference vocabularies: organizational units, employment-status
//! categories and workload-tier definitions. Immutable within a session;
//! unknown names during import are a validation error, never auto-created.

use serde::{Deserialize, Serialize};

/// The three reference vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    Unit,
    EmploymentStatus,
    WorkloadTier,
}

/// One entry of a reference vocabulary
///
/// `weight` is only populated for workload tiers; it drives ordering,
/// the display name never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl LookupEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            weight: None,
        }
    }

    pub fn weighted(id: i64, name: impl Into<String>, weight: i64) -> Self {
        Self {
            id,
            name: name.into(),
            weight: Some(weight),
        }
    }
}

/// Name normalization used for all case-insensitive lookups
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
