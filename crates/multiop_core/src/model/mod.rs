//! Board domain model.
//!
//! # Responsibility
//! - Define the canonical project record and its classification enums.
//! - Provide draft shapes for editor and quick-capture creation paths.
//!
//! # Invariants
//! - Every stored project is identified by a unique, non-blank `ProjectId`.
//! - `status` always names one of the four board columns.
//! - A stored project never has a blank title.

pub mod project;
