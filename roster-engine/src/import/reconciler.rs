//! Bulk Reconciler
//!
//! 批量导入的唯一入口：把松散类型的表格行核对成严格的写入请求。
//!
//! 逐行处理，行内任何错误不会中断整批；按行累积错误并照常提交
//! 通过校验的行。唯一的致命失败是最后的批量写入 — 那是全有或全无，
//! 直接作为 `Err` 上抛，不混入逐行错误列表。

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::rows::{SheetRow, columns};
use crate::db::models::{Vocabulary, clamp_utilization};
use crate::db::{PersonnelInput, Shift, WorkMode};
use crate::roster::RosterStore;
use crate::utils::RosterResult;
use crate::utils::time::parse_date;

/// Three-part reconciliation outcome, returned even when nothing succeeded
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub success_count: usize,
    pub duplicate_count: usize,
    pub errors: Vec<String>,
}

/// Converts raw sheet rows into validated roster inserts
pub struct BulkImporter {
    store: Arc<RosterStore>,
    // One reconciliation at a time: interleaved imports would corrupt
    // duplicate detection against the running code set
    busy: Mutex<()>,
}

impl BulkImporter {
    pub fn new(store: Arc<RosterStore>) -> Self {
        Self {
            store,
            busy: Mutex::new(()),
        }
    }

    /// Reconcile rows against the lookup directory and the live roster,
    /// then commit all valid rows as one batched insert
    ///
    /// A second concurrent call waits until the first finishes.
    pub async fn import(&self, rows: Vec<SheetRow>) -> RosterResult<ImportOutcome> {
        let _serialized = self.busy.lock().await;

        let directory = self.store.directory();
        let config = self.store.config();
        let valid_units = directory.names(Vocabulary::Unit).join(", ");
        let valid_statuses = directory.names(Vocabulary::EmploymentStatus).join(", ");

        // Codes already on the roster; grows as rows are accepted so
        // duplicates later in the same batch are caught too
        let mut existing: HashSet<String> = self
            .store
            .snapshot()
            .iter()
            .map(|r| r.code.clone())
            .collect();

        let mut queue: Vec<PersonnelInput> = Vec::new();
        let mut duplicate_count = 0usize;
        let mut errors: Vec<String> = Vec::new();

        for row in &rows {
            let code = row.text(columns::CODE);
            if code.is_empty() || existing.contains(&code) {
                duplicate_count += 1;
                continue;
            }

            let unit_name = row.text(columns::UNIT);
            if unit_name.is_empty() {
                errors.push(format!("Code {}: column \"Unit\" is required", code));
                continue;
            }
            let Some(unit_id) = directory.resolve_name(Vocabulary::Unit, &unit_name) else {
                errors.push(format!(
                    "Code {}: unit \"{}\" not found. Valid choices: {}",
                    code, unit_name, valid_units
                ));
                continue;
            };

            let status_name = row.text(columns::STATUS);
            if status_name.is_empty() {
                errors.push(format!("Code {}: column \"Status\" is required", code));
                continue;
            }
            let Some(status_id) =
                directory.resolve_name(Vocabulary::EmploymentStatus, &status_name)
            else {
                errors.push(format!(
                    "Code {}: status \"{}\" not found. Valid choices: {}",
                    code, status_name, valid_statuses
                ));
                continue;
            };

            // Permanent staff carry no contract date, whatever the cell says
            let contract_end = if directory
                .is_permanent_status(status_id, &config.permanent_status)
            {
                None
            } else {
                let raw = row.text(columns::CONTRACT_END);
                if raw.is_empty() {
                    None
                } else {
                    match parse_date(&raw) {
                        Ok(date) => Some(date),
                        Err(_) => {
                            errors.push(format!(
                                "Code {}: invalid contract-end date \"{}\" (expected YYYY-MM-DD)",
                                code, raw
                            ));
                            continue;
                        }
                    }
                }
            };

            let utilization = clamp_utilization(row.number(columns::UTILIZATION).unwrap_or(0.0));
            let shift = Shift::parse_label(&row.text(columns::SHIFT)).unwrap_or_default();
            let work_mode = WorkMode::parse_label(&row.text(columns::MODE)).unwrap_or_default();

            let specializations: Vec<String> = row
                .text(columns::SPECIALIZATION)
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();

            queue.push(PersonnelInput {
                code: code.clone(),
                name: text_or(row, columns::NAME, &config.default_name),
                unit_id,
                status_id,
                project: text_or(row, columns::PROJECT, &config.default_project),
                location: text_or(row, columns::LOCATION, &config.default_location),
                contact: text_or(row, columns::CONTACT, &config.default_contact),
                utilization,
                shift,
                work_mode,
                contract_end,
                specializations,
            });
            existing.insert(code);
        }

        let success_count = queue.len();
        if !queue.is_empty() {
            // Fatal to the whole batch on failure, surfaced as Err
            self.store.create_batch(queue).await?;
        }

        tracing::info!(
            success = success_count,
            duplicates = duplicate_count,
            rejected = errors.len(),
            "bulk import reconciled"
        );

        Ok(ImportOutcome {
            success_count,
            duplicate_count,
            errors,
        })
    }
}

fn text_or(row: &SheetRow, column: &str, default: &str) -> String {
    let value = row.text(column);
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
