//! Board use-case services.
//!
//! # Responsibility
//! - Own the canonical project sequence and its mutations (`project_store`).
//! - Translate surface signals into store calls (`board_controller`).
//! - Supply identities and first-run data (`id_generator`, `seed`).
//!
//! # Invariants
//! - Only `ProjectStore` mutates the sequence; everything else reads
//!   snapshots or goes through its operations.

pub mod board_controller;
pub mod id_generator;
pub mod project_store;
pub mod seed;
