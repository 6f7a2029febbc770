//! Read-side projections of the board.
//!
//! # Responsibility
//! - Derive what a board surface shows from a snapshot plus filter criteria.
//! - Stay independent from storage and mutation paths.

pub mod board_view;
