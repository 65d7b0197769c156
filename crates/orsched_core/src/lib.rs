//! Core domain logic for the OR nurse scheduling dashboard.
//! This crate is the single source of truth for roster invariants.

pub mod board;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use board::unit_board::Unit;
pub use config::{ConfigError, SchedulerSettings};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, init_logging_with, logging_status};
pub use model::assignment::Assignment;
pub use model::clock::{ClockTime, ClockTimeError};
pub use model::nurse::{NewNurse, Nurse, NurseId, NursePatch, NurseRole, ShiftType};
pub use model::operating_room::{
    NewOperatingRoom, OperatingRoom, OperatingRoomPatch, OrCategory, OrFloor, OrId,
};
pub use model::surgery::{NewSurgery, ProtocolLength, Surgery, SurgeryId, SurgeryPatch};
pub use model::ValidationError;
pub use repo::{RepoError, RepoResult};
pub use service::schedule_service::{ScheduleDraft, ScheduleError};
pub use session::DashboardSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
