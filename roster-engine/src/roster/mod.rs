//! Roster Store
//!
//! 花名册的权威内存副本。
//!
//! # 一致性策略
//!
//! - `reload()` 全量拉取并整体换掉快照 (绝不增量合并)：读取方要么看到
//!   旧的完整快照、要么看到新的完整快照，不会看到混合状态。
//! - 写操作 (`create`/`update`/`delete`) 只透传给后端，成功后触发
//!   `reload()` 而不是本地打补丁 — 多一次往返，换来内存视图与后端
//!   下一次读取必然一致。
//! - 后端变更通知 (任何来源) 同样只触发 `reload()`；突发通知可以合并，
//!   但最后一条通知落定后必然有一次反映该状态的 reload 完成。
//! - 被更新 reload 超越的旧 reload 结果直接丢弃 (按发起顺序的序号判定)，
//!   避免旧数据覆盖新数据。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::core::Config;
use crate::db::backend::PERSONNEL_TABLE;
use crate::db::models::Vocabulary;
use crate::db::{PersonnelInput, PersonnelRecord, RosterBackend};
use crate::lookup::LookupDirectory;
use crate::utils::{RosterError, RosterResult};
use crate::views::{self, ContractNotification, RosterStats, ViewContext};


struct Installed {
    generation: u64,
    records: Arc<Vec<PersonnelRecord>>,
}

/// Authoritative in-memory roster, refreshed wholesale from the backend
pub struct RosterStore {
    backend: Arc<dyn RosterBackend>,
    directory: Arc<LookupDirectory>,
    config: Config,
    snapshot: RwLock<Installed>,
    reload_seq: AtomicU64,
    version_tx: watch::Sender<u64>,
}

impl RosterStore {
    pub fn new(
        backend: Arc<dyn RosterBackend>,
        directory: Arc<LookupDirectory>,
        config: Config,
    ) -> Self {
        let (version_tx, _) = watch::channel(0);
        Self {
            backend,
            directory,
            config,
            snapshot: RwLock::new(Installed {
                generation: 0,
                records: Arc::new(Vec::new()),
            }),
            reload_seq: AtomicU64::new(0),
            version_tx,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn directory(&self) -> &Arc<LookupDirectory> {
        &self.directory
    }

    /// Current complete snapshot (cheap `Arc` clone)
    pub fn snapshot(&self) -> Arc<Vec<PersonnelRecord>> {
        Arc::clone(&self.snapshot.read().records)
    }

    /// Observe snapshot generations; derived views recompute on change
    pub fn subscribe_versions(&self) -> watch::Receiver<u64> {
        self.version_tx.subscribe()
    }

    /// Full fetch + whole-snapshot swap
    pub async fn reload(&self) -> RosterResult<()> {
        let seq = self.reload_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let records = self.backend.fetch_all_records().await?;
        self.install(seq, records);
        Ok(())
    }

    /// Install a fetched roster unless a newer reload has already landed
    fn install(&self, generation: u64, records: Vec<PersonnelRecord>) -> bool {
        let mut guard = self.snapshot.write();
        if generation <= guard.generation {
            tracing::debug!(
                generation,
                installed = guard.generation,
                "discarding stale reload result"
            );
            return false;
        }
        guard.generation = generation;
        guard.records = Arc::new(records);
        let _ = self.version_tx.send(generation);
        true
    }

    // ========== Write Operations ==========

    pub async fn create(&self, input: PersonnelInput) -> RosterResult<PersonnelRecord> {
        let input = self.prepare(input, None)?;
        let record = self.backend.insert_record(input).await?;
        self.reload().await?;
        tracing::info!(code = %record.code, "personnel record created");
        Ok(record)
    }

    pub async fn update(&self, id: &str, input: PersonnelInput) -> RosterResult<PersonnelRecord> {
        let input = self.prepare(input, Some(id))?;
        let record = self.backend.update_record(id, input).await?;
        self.reload().await?;
        tracing::info!(code = %record.code, "personnel record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> RosterResult<()> {
        self.backend.delete_record(id).await?;
        self.reload().await?;
        tracing::info!(id, "personnel record deleted");
        Ok(())
    }

    /// All-or-nothing batched insert (bulk import commit path)
    ///
    /// Inputs must already be validated; a failure here aborts the whole
    /// batch and is surfaced to the caller untouched.
    pub async fn create_batch(&self, inputs: Vec<PersonnelInput>) -> RosterResult<()> {
        let count = inputs.len();
        self.backend.insert_batch(inputs).await?;
        self.reload().await?;
        tracing::info!(count, "batched insert committed");
        Ok(())
    }

    /// Validate and normalize a write payload against the *current* snapshot
    ///
    /// Duplicate-code and reference checks happen here, before any backend
    /// call. `exclude_id` exempts the record being updated from the
    /// uniqueness check.
    fn prepare(
        &self,
        mut input: PersonnelInput,
        exclude_id: Option<&str>,
    ) -> RosterResult<PersonnelInput> {
        input.validate()?;

        if self
            .directory
            .resolve_id(Vocabulary::Unit, input.unit_id)
            .is_none()
        {
            return Err(RosterError::reference(format!(
                "unit id {} does not resolve",
                input.unit_id
            )));
        }
        if self
            .directory
            .resolve_id(Vocabulary::EmploymentStatus, input.status_id)
            .is_none()
        {
            return Err(RosterError::reference(format!(
                "employment status id {} does not resolve",
                input.status_id
            )));
        }

        // Case-sensitive exact match against the current snapshot
        let snapshot = self.snapshot();
        if snapshot
            .iter()
            .any(|r| r.code == input.code && exclude_id != Some(r.id.as_str()))
        {
            return Err(RosterError::duplicate(format!(
                "employee code '{}' already exists",
                input.code
            )));
        }

        // Permanent staff carry no contract-end date
        if self
            .directory
            .is_permanent_status(input.status_id, &self.config.permanent_status)
        {
            input.contract_end = None;
        }

        Ok(input)
    }

    // ========== Derived Projections ==========

    /// View context for the live snapshot (tier weights + thresholds)
    pub fn view_context(&self) -> ViewContext {
        ViewContext::new(&self.directory, &self.config)
    }

    /// Aggregate stats over the full (unfiltered) roster
    pub fn current_stats(&self) -> RosterStats {
        views::stats(&self.snapshot(), &self.view_context())
    }

    /// Contract-expiry notifications for the live snapshot
    pub fn current_notifications(&self) -> Vec<ContractNotification> {
        views::contract_notifications(&self.snapshot(), &self.view_context())
    }

    // ========== Change Feed ==========

    /// Start reloading on backend change notifications
    ///
    /// Bursts are coalesced (pending events are drained before each reload).
    /// The returned handle stops the listener on `cancel()` or drop.
    pub fn watch_changes(self: &Arc<Self>) -> ChangeListener {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let store = Arc::clone(self);
        let mut rx = store.backend.subscribe_to_changes(PERSONNEL_TABLE);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    event = rx.recv() => match event {
                        Ok(_) => {
                            // Coalesce: drain whatever queued up, reload once
                            while rx.try_recv().is_ok() {}
                            if let Err(e) = store.reload().await {
                                tracing::warn!(error = %e, "reload after change notification failed");
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "change feed lagged, reloading");
                            if let Err(e) = store.reload().await {
                                tracing::warn!(error = %e, "reload after lagged feed failed");
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
            tracing::debug!("change listener stopped");
        });

        ChangeListener { token }
    }
}

/// Cancellable handle for a running change listener
///
/// Dropping the handle also stops the listener, so a forgotten teardown
/// cannot leak a subscription across store lifetimes.
pub struct ChangeListener {
    token: CancellationToken,
}

impl ChangeListener {
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for ChangeListener {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
