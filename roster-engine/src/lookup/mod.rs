//! Lookup Directory
//!
//! 引用词表目录 — 每个会话从后端解析一次，只读。
//!
//! `load()` 整体替换快照：读取方要么看到旧目录、要么看到新目录，
//! 绝不会看到半更新状态。名字解析大小写不敏感；查不到返回 `None`，
//! 是否算错误由调用方决定。

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::db::models::{LookupEntry, Vocabulary, normalize_name};
use crate::db::RosterBackend;
use crate::utils::RosterResult;

#[derive(Debug, Default)]
struct VocabTable {
    entries: Vec<LookupEntry>,
    by_name: HashMap<String, i64>,
    by_id: HashMap<i64, String>,
}

impl VocabTable {
    fn build(entries: Vec<LookupEntry>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_id = HashMap::with_capacity(entries.len());
        for entry in &entries {
            by_name.insert(normalize_name(&entry.name), entry.id);
            by_id.insert(entry.id, entry.name.clone());
        }
        Self {
            entries,
            by_name,
            by_id,
        }
    }
}

#[derive(Debug, Default)]
struct DirectorySnapshot {
    units: VocabTable,
    statuses: VocabTable,
    tiers: VocabTable,
}

impl DirectorySnapshot {
    fn table(&self, vocab: Vocabulary) -> &VocabTable {
        match vocab {
            Vocabulary::Unit => &self.units,
            Vocabulary::EmploymentStatus => &self.statuses,
            Vocabulary::WorkloadTier => &self.tiers,
        }
    }
}

/// Read-only directory of the three reference vocabularies
pub struct LookupDirectory {
    backend: Arc<dyn RosterBackend>,
    snapshot: RwLock<Arc<DirectorySnapshot>>,
}

impl LookupDirectory {
    /// Create an empty directory; call [`load`](Self::load) before resolving
    pub fn new(backend: Arc<dyn RosterBackend>) -> Self {
        Self {
            backend,
            snapshot: RwLock::new(Arc::new(DirectorySnapshot::default())),
        }
    }

    /// Fetch all three vocabularies and replace the snapshot atomically
    pub async fn load(&self) -> RosterResult<()> {
        let (units, statuses, tiers) = tokio::try_join!(
            self.backend.fetch_lookup(Vocabulary::Unit),
            self.backend.fetch_lookup(Vocabulary::EmploymentStatus),
            self.backend.fetch_lookup(Vocabulary::WorkloadTier),
        )?;

        let next = Arc::new(DirectorySnapshot {
            units: VocabTable::build(units),
            statuses: VocabTable::build(statuses),
            tiers: VocabTable::build(tiers),
        });

        *self.snapshot.write() = next;
        tracing::debug!("lookup directory loaded");
        Ok(())
    }

    /// Case-insensitive name → id
    pub fn resolve_name(&self, vocab: Vocabulary, name: &str) -> Option<i64> {
        self.snapshot
            .read()
            .table(vocab)
            .by_name
            .get(&normalize_name(name))
            .copied()
    }

    /// Exact id → display name
    pub fn resolve_id(&self, vocab: Vocabulary, id: i64) -> Option<String> {
        self.snapshot.read().table(vocab).by_id.get(&id).cloned()
    }

    /// Display names in backend order (used in import error messages)
    pub fn names(&self, vocab: Vocabulary) -> Vec<String> {
        self.snapshot
            .read()
            .table(vocab)
            .entries
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Workload-tier display name → ordering weight (missing weight = 0)
    pub fn tier_weights(&self) -> HashMap<String, i64> {
        self.snapshot
            .read()
            .tiers
            .entries
            .iter()
            .map(|e| (e.name.clone(), e.weight.unwrap_or(0)))
            .collect()
    }

    /// Does this status id name the configured "Permanent" category?
    pub fn is_permanent_status(&self, status_id: i64, permanent_name: &str) -> bool {
        self.resolve_id(Vocabulary::EmploymentStatus, status_id)
            .is_some_and(|name| normalize_name(&name) == normalize_name(permanent_name))
    }
}
