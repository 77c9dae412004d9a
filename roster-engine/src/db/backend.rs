//! Backend Abstraction
//!
//! The remote store is an external collaborator; the engine talks to it
//! through this narrow trait and never depends on its internals. Writes are
//! never mirrored into local state by the callers — consistency is
//! re-established only by a subsequent full reload.

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::models::{LookupEntry, PersonnelInput, PersonnelRecord, Vocabulary};
use crate::utils::RosterResult;

/// Mutation notification from the backend
///
/// Carries no payload detail beyond "something changed in this table";
/// consumers must treat it purely as a reload trigger.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub table: String,
}

impl ChangeEvent {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

/// Personnel table name used for change subscriptions
pub const PERSONNEL_TABLE: &str = "personnel";

/// 持久化后端接口
///
/// | 操作 | 失败语义 |
/// |------|----------|
/// | fetch_* | Backend |
/// | insert_record | Duplicate (唯一约束) / Backend |
/// | update_record | NotFound / Duplicate / Backend |
/// | delete_record | NotFound / Backend |
/// | insert_batch | 全有或全无; Duplicate / Backend |
#[async_trait]
pub trait RosterBackend: Send + Sync {
    /// Fetch one reference vocabulary, in backend order
    async fn fetch_lookup(&self, vocab: Vocabulary) -> RosterResult<Vec<LookupEntry>>;

    /// Fetch all personnel records, sorted by name
    async fn fetch_all_records(&self) -> RosterResult<Vec<PersonnelRecord>>;

    async fn insert_record(&self, input: PersonnelInput) -> RosterResult<PersonnelRecord>;

    async fn update_record(&self, id: &str, input: PersonnelInput)
    -> RosterResult<PersonnelRecord>;

    async fn delete_record(&self, id: &str) -> RosterResult<()>;

    /// All-or-nothing batched insert
    async fn insert_batch(&self, inputs: Vec<PersonnelInput>) -> RosterResult<()>;

    /// Subscribe to mutation events for one table (any origin)
    fn subscribe_to_changes(&self, table: &str) -> broadcast::Receiver<ChangeEvent>;
}
