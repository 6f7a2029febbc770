//! Persistence adapters for the board slot.
//!
//! # Responsibility
//! - Define the load/save contract the store depends on.
//! - Keep SQL and JSON encoding details out of store/controller logic.
//!
//! # Invariants
//! - Adapters persist the full ordered sequence; there are no partial writes.
//! - Read paths reject invalid stored state instead of masking it; callers
//!   decide how to degrade.

pub mod project_repo;
