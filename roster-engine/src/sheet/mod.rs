//! Spreadsheet Boundary
//!
//! The binary sheet format lives outside the engine: [`SheetCodec`] is the
//! opaque bytes ↔ rows transform a host supplies. This module only defines
//! the roster-side projections — flat export rows carrying lookup *names*
//! (never ids) and the sample rows for the import template.

use crate::db::PersonnelRecord;
use crate::import::{SheetRow, columns};
use crate::utils::RosterResult;

/// Opaque spreadsheet codec supplied by the host
///
/// Both directions are schema-unaware; the engine never learns the byte
/// format and the codec never learns the roster.
pub trait SheetCodec: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> RosterResult<Vec<SheetRow>>;
    fn write(&self, rows: &[SheetRow]) -> RosterResult<Vec<u8>>;
}

/// Column order for exports and the template
pub const EXPORT_COLUMNS: [&str; 13] = [
    columns::CODE,
    columns::NAME,
    columns::UNIT,
    columns::PROJECT,
    columns::LOCATION,
    columns::CONTACT,
    columns::UTILIZATION,
    columns::STATUS,
    columns::SHIFT,
    columns::MODE,
    columns::CONTRACT_END,
    columns::SPECIALIZATION,
    columns::WORKLOAD_TIER,
];

/// Flat export projection of a snapshot (names, not ids)
pub fn export_rows(records: &[PersonnelRecord]) -> Vec<SheetRow> {
    records
        .iter()
        .map(|r| {
            SheetRow::new()
                .with(columns::CODE, r.code.clone())
                .with(columns::NAME, r.name.clone())
                .with(columns::UNIT, r.unit_name.clone())
                .with(columns::PROJECT, r.project.clone())
                .with(columns::LOCATION, r.location.clone())
                .with(columns::CONTACT, r.contact.clone())
                .with(columns::UTILIZATION, r.utilization)
                .with(columns::STATUS, r.status_name.clone())
                .with(columns::SHIFT, r.shift.label())
                .with(columns::MODE, r.work_mode.label())
                .with(
                    columns::CONTRACT_END,
                    r.contract_end
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                )
                .with(columns::SPECIALIZATION, r.specializations.join(", "))
                .with(columns::WORKLOAD_TIER, r.workload_tier.clone())
        })
        .collect()
}

/// Rows for the downloadable import template: two filled-in samples plus a
/// trailing hint row naming the valid choices and formats per column
///
/// Unit and Status cells must carry display names; the reconciler resolves
/// them against the lookup directory, so the hint row is built from the
/// directory's current name lists.
pub fn template_rows(unit_names: &[String], status_names: &[String]) -> Vec<SheetRow> {
    vec![
        SheetRow::new()
            .with(columns::CODE, "IT2024001")
            .with(columns::NAME, "Ahmad Subarjo")
            .with(columns::UNIT, "Network Ops")
            .with(columns::PROJECT, "Peruri")
            .with(columns::LOCATION, "Jakarta")
            .with(columns::CONTACT, "08123456789")
            .with(columns::UTILIZATION, 85)
            .with(columns::STATUS, "Permanent")
            .with(columns::SHIFT, "Morning")
            .with(columns::MODE, "Onsite")
            .with(columns::CONTRACT_END, "")
            .with(columns::SPECIALIZATION, "Cisco, Fortigate"),
        SheetRow::new()
            .with(columns::CODE, "IT2024002")
            .with(columns::NAME, "Siti Nurhaliza")
            .with(columns::UNIT, "Security Ops")
            .with(columns::PROJECT, "General")
            .with(columns::LOCATION, "Bandung")
            .with(columns::CONTACT, "08198765432")
            .with(columns::UTILIZATION, 95)
            .with(columns::STATUS, "Outsourced")
            .with(columns::SHIFT, "Afternoon")
            .with(columns::MODE, "Hybrid")
            .with(columns::CONTRACT_END, "2026-06-30")
            .with(columns::SPECIALIZATION, "Firewall, SIEM"),
        SheetRow::new()
            .with(columns::CODE, "← Unique, required")
            .with(columns::NAME, "← Full name")
            .with(columns::UNIT, format!("Choices: {}", unit_names.join(" | ")))
            .with(columns::PROJECT, "← Project name")
            .with(columns::LOCATION, "← City")
            .with(columns::CONTACT, "← Phone number")
            .with(columns::UTILIZATION, "← Number 0-100")
            .with(
                columns::STATUS,
                format!("Choices: {}", status_names.join(" | ")),
            )
            .with(columns::SHIFT, "Choices: Morning | Afternoon | Night")
            .with(columns::MODE, "Choices: Onsite | Hybrid | Remote")
            .with(
                columns::CONTRACT_END,
                "← Format: YYYY-MM-DD (leave blank for Permanent)",
            )
            .with(columns::SPECIALIZATION, "← Comma separated"),
    ]
}
