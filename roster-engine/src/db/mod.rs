//! Database Layer
//!
//! Models, the backend trait, and (for tests) an in-memory backend.

pub mod backend;
pub mod models;

#[cfg(test)]
pub mod mock;

pub use backend::{ChangeEvent, PERSONNEL_TABLE, RosterBackend};
pub use models::{
    LookupEntry, PersonnelInput, PersonnelRecord, RecordId, Shift, Vocabulary, WorkMode,
};
