//! Bulk Import
//!
//! Raw sheet rows and their reconciliation into validated roster inserts.

pub mod reconciler;
pub mod rows;


pub use reconciler::{BulkImporter, ImportOutcome};
pub use rows::{SheetRow, columns};
