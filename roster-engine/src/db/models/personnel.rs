//! Personnel Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Personnel record ID type (assigned by the backend)
pub type RecordId = String;

/// Shift enumeration (ordered by position in the working day)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[default]
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    /// Parse free text (case-insensitive); unknown text yields `None`
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "morning" => Some(Shift::Morning),
            "afternoon" => Some(Shift::Afternoon),
            "night" => Some(Shift::Night),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }
}

/// Work-mode enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    #[default]
    Onsite,
    Hybrid,
    Remote,
}

impl WorkMode {
    /// Parse free text (case-insensitive); unknown text yields `None`
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "onsite" => Some(WorkMode::Onsite),
            "hybrid" => Some(WorkMode::Hybrid),
            "remote" => Some(WorkMode::Remote),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkMode::Onsite => "Onsite",
            WorkMode::Hybrid => "Hybrid",
            WorkMode::Remote => "Remote",
        }
    }
}

/// Personnel record as reported by the backend
///
/// `unit_name` / `status_name` are denormalized from the lookup tables by the
/// backend fetch (the store never joins locally). `workload_tier` is derived
/// by the backend from `utilization`; the engine treats it as opaque text and
/// orders it only through the workload-tier lookup weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub id: RecordId,
    pub code: String,
    pub name: String,
    pub unit_id: i64,
    pub unit_name: String,
    pub status_id: i64,
    pub status_name: String,
    pub project: String,
    pub location: String,
    pub contact: String,
    pub utilization: u8,
    pub shift: Shift,
    pub work_mode: WorkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_end: Option<NaiveDate>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub workload_tier: String,
}

/// Create/update payload — the full mutable attribute set
///
/// Edits replace this whole set; there are no partial updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonnelInput {
    #[validate(length(min = 1, message = "employee code must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub unit_id: i64,
    pub status_id: i64,
    pub project: String,
    pub location: String,
    pub contact: String,
    #[validate(range(max = 100, message = "utilization must be within 0-100"))]
    pub utilization: u8,
    pub shift: Shift,
    pub work_mode: WorkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_end: Option<NaiveDate>,
    #[serde(default)]
    pub specializations: Vec<String>,
}

/// Clamp a loosely-typed utilization value into [0, 100]
pub fn clamp_utilization(raw: f64) -> u8 {
    if !raw.is_finite() || raw < 0.0 {
        0
    } else if raw > 100.0 {
        100
    } else {
        raw as u8
    }
}
