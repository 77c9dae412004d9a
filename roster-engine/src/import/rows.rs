//! Raw Sheet Rows
//!
//! A parsed spreadsheet row is a bag of loosely-typed cells keyed by header
//! label. This type is the only shape raw import data ever takes inside the
//! engine; the reconciler is the single boundary where it becomes a strict
//! [`PersonnelInput`](crate::db::PersonnelInput).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column labels shared by import, export and the template
pub mod columns {
    pub const CODE: &str = "Code";
    pub const NAME: &str = "Name";
    pub const UNIT: &str = "Unit";
    pub const PROJECT: &str = "Project";
    pub const LOCATION: &str = "Location";
    pub const CONTACT: &str = "Contact";
    pub const UTILIZATION: &str = "Utilization";
    pub const STATUS: &str = "Status";
    pub const SHIFT: &str = "Shift";
    pub const MODE: &str = "Mode";
    pub const CONTRACT_END: &str = "Contract_End";
    pub const SPECIALIZATION: &str = "Specialization";
    pub const WORKLOAD_TIER: &str = "Workload_Tier";
}

/// One spreadsheet row: header label → cell value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(flatten)]
    cells: serde_json::Map<String, Value>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cell assignment (used heavily by export and tests)
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.cells.insert(column.to_string(), value.into());
        self
    }

    /// Cell as trimmed text; numbers are rendered, anything else is empty
    pub fn text(&self, column: &str) -> String {
        match self.cells.get(column) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    i.to_string()
                } else {
                    n.to_string()
                }
            }
            _ => String::new(),
        }
    }

    /// Cell as a number; numeric text is parsed, anything else is `None`
    pub fn number(&self, column: &str) -> Option<f64> {
        match self.cells.get(column) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
