//! Data Models
//!
//! Personnel records and lookup vocabularies.

pub mod lookup;
pub mod personnel;

pub use lookup::{LookupEntry, Vocabulary, normalize_name};
pub use personnel::{
    PersonnelInput, PersonnelRecord, RecordId, Shift, WorkMode, clamp_utilization,
};
