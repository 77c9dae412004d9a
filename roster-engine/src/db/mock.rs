//! In-Memory Backend (test only)
//!
//! Behaves like the remote store the engine is written against: enforces the
//! unique employee-code constraint, joins lookup names into fetched records,
//! derives the workload tier from utilization, emits change events on every
//! mutation, and applies batches all-or-nothing. Counters and failure switches
//! let tests assert call patterns and error paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use super::backend::{ChangeEvent, PERSONNEL_TABLE, RosterBackend};
use super::models::{LookupEntry, PersonnelInput, PersonnelRecord, Vocabulary};
use crate::utils::{RosterError, RosterResult};

pub struct MockBackend {
    units: Vec<LookupEntry>,
    statuses: Vec<LookupEntry>,
    tiers: Vec<LookupEntry>,
    records: Mutex<Vec<PersonnelRecord>>,
    next_id: AtomicU64,
    tx: broadcast::Sender<ChangeEvent>,

    /// fetch_all_records invocations (reload coalescing assertions)
    pub fetch_count: AtomicUsize,
    /// insert/update/delete/batch invocations (proactive-check assertions)
    pub write_count: AtomicUsize,
    /// When set, every write fails with a Backend error
    pub fail_writes: AtomicBool,
    /// When set, insert_batch fails with a Backend error
    pub fail_batch: AtomicBool,
}

impl MockBackend {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            units: vec![
                LookupEntry::new(1, "Network Ops"),
                LookupEntry::new(2, "Cloud Infra"),
                LookupEntry::new(3, "Security Ops"),
                LookupEntry::new(4, "Database Management"),
            ],
            statuses: vec![
                LookupEntry::new(1, "Permanent"),
                LookupEntry::new(2, "Outsourced"),
                LookupEntry::new(3, "Contractor"),
            ],
            tiers: vec![
                LookupEntry::weighted(1, "Critical", 4),
                LookupEntry::weighted(2, "High", 3),
                LookupEntry::weighted(3, "Balanced", 2),
                LookupEntry::weighted(4, "Low", 1),
            ],
            records: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            tx,
            fetch_count: AtomicUsize::new(0),
            write_count: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            fail_batch: AtomicBool::new(false),
        }
    }

    pub fn record_by_code(&self, code: &str) -> Option<PersonnelRecord> {
        self.records.lock().iter().find(|r| r.code == code).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    /// Emit a bare change event, as another client's mutation would
    pub fn emit_change(&self) {
        self.notify();
    }

    fn lookup_name(entries: &[LookupEntry], id: i64) -> RosterResult<String> {
        entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.clone())
            .ok_or_else(|| RosterError::reference(format!("lookup id {} does not exist", id)))
    }

    // Stand-in for the store-side trigger that fills workload_tier
    fn derive_tier(utilization: u8) -> &'static str {
        match utilization {
            91..=100 => "Critical",
            70..=90 => "High",
            40..=69 => "Balanced",
            _ => "Low",
        }
    }

    fn materialize(&self, input: PersonnelInput) -> RosterResult<PersonnelRecord> {
        let unit_name = Self::lookup_name(&self.units, input.unit_id)?;
        let status_name = Self::lookup_name(&self.statuses, input.status_id)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(PersonnelRecord {
            id: format!("personnel:{}", id),
            code: input.code,
            name: input.name,
            unit_id: input.unit_id,
            unit_name,
            status_id: input.status_id,
            status_name,
            project: input.project,
            location: input.location,
            contact: input.contact,
            utilization: input.utilization,
            shift: input.shift,
            work_mode: input.work_mode,
            contract_end: input.contract_end,
            specializations: input.specializations,
            workload_tier: Self::derive_tier(input.utilization).to_string(),
        })
    }

    fn notify(&self) {
        let _ = self.tx.send(ChangeEvent::new(PERSONNEL_TABLE));
    }

    fn check_writable(&self) -> RosterResult<()> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RosterError::backend("mock backend unavailable"));
        }
        Ok(())
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RosterBackend for MockBackend {
    async fn fetch_lookup(&self, vocab: Vocabulary) -> RosterResult<Vec<LookupEntry>> {
        Ok(match vocab {
            Vocabulary::Unit => self.units.clone(),
            Vocabulary::EmploymentStatus => self.statuses.clone(),
            Vocabulary::WorkloadTier => self.tiers.clone(),
        })
    }

    async fn fetch_all_records(&self) -> RosterResult<Vec<PersonnelRecord>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().clone();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    async fn insert_record(&self, input: PersonnelInput) -> RosterResult<PersonnelRecord> {
        self.check_writable()?;
        let record = self.materialize(input)?;
        {
            let mut records = self.records.lock();
            if records.iter().any(|r| r.code == record.code) {
                return Err(RosterError::duplicate(format!(
                    "employee code '{}' already exists",
                    record.code
                )));
            }
            records.push(record.clone());
        }
        self.notify();
        Ok(record)
    }

    async fn update_record(
        &self,
        id: &str,
        input: PersonnelInput,
    ) -> RosterResult<PersonnelRecord> {
        self.check_writable()?;
        let mut updated = self.materialize(input)?;
        {
            let mut records = self.records.lock();
            if records.iter().any(|r| r.id != id && r.code == updated.code) {
                return Err(RosterError::duplicate(format!(
                    "employee code '{}' already exists",
                    updated.code
                )));
            }
            let slot = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| RosterError::not_found(format!("record {} not found", id)))?;
            updated.id = slot.id.clone();
            *slot = updated.clone();
        }
        self.notify();
        Ok(updated)
    }

    async fn delete_record(&self, id: &str) -> RosterResult<()> {
        self.check_writable()?;
        {
            let mut records = self.records.lock();
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                return Err(RosterError::not_found(format!("record {} not found", id)));
            }
        }
        self.notify();
        Ok(())
    }

    async fn insert_batch(&self, inputs: Vec<PersonnelInput>) -> RosterResult<()> {
        self.check_writable()?;
        if self.fail_batch.load(Ordering::SeqCst) {
            return Err(RosterError::backend("mock batch insert failed"));
        }
        // Materialize and constraint-check everything before touching storage
        let mut batch = Vec::with_capacity(inputs.len());
        let mut seen = HashSet::new();
        for input in inputs {
            let record = self.materialize(input)?;
            if !seen.insert(record.code.clone()) {
                return Err(RosterError::duplicate(format!(
                    "employee code '{}' repeated in batch",
                    record.code
                )));
            }
            batch.push(record);
        }
        {
            let mut records = self.records.lock();
            for record in &batch {
                if records.iter().any(|r| r.code == record.code) {
                    return Err(RosterError::duplicate(format!(
                        "employee code '{}' already exists",
                        record.code
                    )));
                }
            }
            records.extend(batch);
        }
        self.notify();
        Ok(())
    }

    fn subscribe_to_changes(&self, _table: &str) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }
}
