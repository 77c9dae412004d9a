//! Derived View Engine
//!
//! Pure functions over a roster snapshot: filtered/sorted subsets, aggregate
//! stats and contract-expiry notifications. Nothing here mutates the roster
//! and nothing is maintained incrementally — every call recomputes from the
//! snapshot it is handed, so a derived view can never drift from the source.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::Config;
use crate::db::models::normalize_name;
use crate::db::{PersonnelRecord, RecordId};
use crate::lookup::LookupDirectory;
use crate::utils::time::{days_until, today_utc};


/// Inputs a view computation needs beyond the snapshot itself
///
/// `today` is injected so callers (and tests) control the clock; tier
/// weights come from the lookup directory, thresholds from [`Config`].
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub today: NaiveDate,
    pub tier_weights: HashMap<String, i64>,
    /// Normalized name of the "Permanent" employment-status category
    pub permanent_status: String,
    pub expiry_window_days: i64,
    pub urgent_threshold_days: i64,
    pub critical_utilization: u8,
}

impl ViewContext {
    pub fn new(directory: &LookupDirectory, config: &Config) -> Self {
        Self {
            today: today_utc(),
            tier_weights: directory.tier_weights(),
            permanent_status: normalize_name(&config.permanent_status),
            expiry_window_days: config.expiry_window_days,
            urgent_threshold_days: config.urgent_threshold_days,
            critical_utilization: config.critical_utilization,
        }
    }

    /// Pin the clock (tests, reproducible reports)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn is_permanent(&self, record: &PersonnelRecord) -> bool {
        normalize_name(&record.status_name) == self.permanent_status
    }

    fn is_critical(&self, record: &PersonnelRecord) -> bool {
        record.utilization > self.critical_utilization
    }

    /// Days remaining in `[0, window]`; no date or past date never matches
    fn is_expiring(&self, record: &PersonnelRecord) -> bool {
        self.remaining_days(record)
            .is_some_and(|days| (0..=self.expiry_window_days).contains(&days))
    }

    fn remaining_days(&self, record: &PersonnelRecord) -> Option<i64> {
        record.contract_end.map(|end| days_until(self.today, end))
    }

    fn tier_weight(&self, record: &PersonnelRecord) -> i64 {
        self.tier_weights
            .get(&record.workload_tier)
            .copied()
            .unwrap_or(0)
    }
}

// ========== Filter / Sort ==========

/// Categorical summary filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFilter {
    #[default]
    All,
    /// Permanent-status records only
    Permanent,
    /// Utilization above the critical threshold
    Critical,
    /// Contract ending within the expiry window
    Expiring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Code,
    Unit,
    Project,
    Location,
    Utilization,
    ContractEnd,
    WorkloadTier,
    Shift,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Filter + sort configuration
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    /// Case-insensitive substring over name, code, project, unit name
    /// and the specialization list
    pub search: Option<String>,
    /// Exact unit-name match
    pub unit: Option<String>,
    pub summary: SummaryFilter,
    pub sort: Option<SortSpec>,
}

/// Filtered/sorted subset of a snapshot
pub fn apply(
    records: &[PersonnelRecord],
    query: &ViewQuery,
    ctx: &ViewContext,
) -> Vec<PersonnelRecord> {
    let mut result: Vec<PersonnelRecord> = records
        .iter()
        .filter(|r| matches_search(r, query.search.as_deref()))
        .filter(|r| query.unit.as_deref().is_none_or(|unit| r.unit_name == unit))
        .filter(|r| match query.summary {
            SummaryFilter::All => true,
            SummaryFilter::Permanent => ctx.is_permanent(r),
            SummaryFilter::Critical => ctx.is_critical(r),
            SummaryFilter::Expiring => ctx.is_expiring(r),
        })
        .cloned()
        .collect();

    if let Some(spec) = query.sort {
        // sort_by is stable: equal keys keep their pre-sort order
        result.sort_by(|a, b| {
            let ord = compare_by_key(a, b, spec.key, ctx);
            match spec.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    result
}

fn matches_search(record: &PersonnelRecord, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(&term)
        || record.code.to_lowercase().contains(&term)
        || record.project.to_lowercase().contains(&term)
        || record.unit_name.to_lowercase().contains(&term)
        || record
            .specializations
            .iter()
            .any(|s| s.to_lowercase().contains(&term))
}

fn compare_by_key(
    a: &PersonnelRecord,
    b: &PersonnelRecord,
    key: SortKey,
    ctx: &ViewContext,
) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Code => a.code.cmp(&b.code),
        SortKey::Unit => a.unit_name.cmp(&b.unit_name),
        SortKey::Project => a.project.cmp(&b.project),
        SortKey::Location => a.location.cmp(&b.location),
        SortKey::Utilization => a.utilization.cmp(&b.utilization),
        SortKey::ContractEnd => a.contract_end.cmp(&b.contract_end),
        // Numeric weight scale, never the display name
        SortKey::WorkloadTier => ctx.tier_weight(a).cmp(&ctx.tier_weight(b)),
        SortKey::Shift => a.shift.cmp(&b.shift),
    }
}

// ========== Aggregate Stats ==========

/// Predicate counts over the full (unfiltered) roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub permanent: usize,
    pub expiring_soon: usize,
    pub critical: usize,
}

pub fn stats(records: &[PersonnelRecord], ctx: &ViewContext) -> RosterStats {
    RosterStats {
        total: records.len(),
        permanent: records.iter().filter(|r| ctx.is_permanent(r)).count(),
        expiring_soon: records.iter().filter(|r| ctx.is_expiring(r)).count(),
        critical: records.iter().filter(|r| ctx.is_critical(r)).count(),
    }
}

// ========== Expiry Notifications ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Urgent,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractNotification {
    pub id: RecordId,
    pub name: String,
    pub message: String,
    pub severity: Severity,
}

/// One notification per record whose remaining days fall in `[0, window]`
///
/// Severity is `Urgent` below the urgent threshold, `Warning` otherwise.
/// Records without a contract-end date never notify.
pub fn contract_notifications(
    records: &[PersonnelRecord],
    ctx: &ViewContext,
) -> Vec<ContractNotification> {
    records
        .iter()
        .filter_map(|record| {
            let end = record.contract_end?;
            let days = days_until(ctx.today, end);
            if !(0..=ctx.expiry_window_days).contains(&days) {
                return None;
            }
            let severity = if days < ctx.urgent_threshold_days {
                Severity::Urgent
            } else {
                Severity::Warning
            };
            Some(ContractNotification {
                id: record.id.clone(),
                name: record.name.clone(),
                message: format!("Contract ends {}", end.format("%Y-%m-%d")),
                severity,
            })
        })
        .collect()
}
