//! Read-side projections that back the dashboard pages.
//!
//! # Responsibility
//! - Derive grid, group, roster and calendar views from roster snapshots.
//! - Stay pure: every projection is a function of its inputs.
//!
//! # Invariants
//! - Input order is preserved; projections never re-sort rosters.

pub mod calendar;
pub mod or_groups;
pub mod roster;
pub mod time_grid;
pub mod unit_board;
