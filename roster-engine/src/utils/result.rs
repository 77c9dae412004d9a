//! Unified Result Types
//!
//! Provides type aliases for commonly used Result types across the engine

use crate::RosterError;

/// Engine-level Result type
pub type RosterResult<T> = Result<T, RosterError>;
