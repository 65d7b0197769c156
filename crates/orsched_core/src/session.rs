//! One dashboard session.
//!
//! # Responsibility
//! - Own the in-memory store, the selected date and the assignment draft.
//! - Apply page-level rules on top of the roster services (date stamping on
//!   add, nurse re-stamping on edit).
//! - Expose the board projections for the selected date.
//!
//! # Invariants
//! - Dropping the session discards every roster; nothing is persisted.
//! - The draft only changes through generate and reassign; the shared
//!   assignment list only through generate and finalize.

use crate::board::calendar::{month_view, CalendarMonth};
use crate::board::or_groups::{or_groups, OrGroup};
use crate::board::roster::{group_by_shift, or_management_page, OrManagementPage, ShiftGroup};
use crate::board::time_grid::{build_time_grid, TimeGrid};
use crate::board::unit_board::{build_unit_board, Unit, UnitBoard};
use crate::config::SchedulerSettings;
use crate::db::{open_db_in_memory, DbResult};
use crate::model::clock::ClockTime;
use crate::model::nurse::{NewNurse, Nurse, NurseId, NursePatch};
use crate::model::operating_room::{NewOperatingRoom, OperatingRoom, OperatingRoomPatch, OrId};
use crate::model::surgery::{NewSurgery, Surgery};
use crate::repo::assignment_repo::SqliteAssignmentRepository;
use crate::repo::nurse_repo::SqliteNurseRepository;
use crate::repo::or_repo::SqliteOperatingRoomRepository;
use crate::repo::surgery_repo::SqliteSurgeryRepository;
use crate::repo::RepoResult;
use crate::service::nurse_service::NurseService;
use crate::service::or_service::OperatingRoomService;
use crate::service::schedule_service::{ScheduleDraft, ScheduleError, ScheduleService};
use crate::service::surgery_service::SurgeryService;
use chrono::{NaiveDate, Utc};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;
use std::collections::HashSet;

pub type SessionScheduleService<'conn> = ScheduleService<
    SqliteNurseRepository<'conn>,
    SqliteSurgeryRepository<'conn>,
    SqliteAssignmentRepository<'conn>,
>;

pub struct DashboardSession {
    conn: Connection,
    settings: SchedulerSettings,
    selected_date: NaiveDate,
    draft: ScheduleDraft,
}

impl DashboardSession {
    /// Opens a session with today's (UTC) date selected.
    pub fn open(settings: SchedulerSettings) -> DbResult<Self> {
        Self::open_on(settings, Utc::now().date_naive())
    }

    pub fn open_on(settings: SchedulerSettings, selected_date: NaiveDate) -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        info!("event=session_open module=session status=ok selected_date={selected_date}");
        Ok(Self {
            conn,
            settings,
            selected_date,
            draft: ScheduleDraft::default(),
        })
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn ors(&self) -> OperatingRoomService<SqliteOperatingRoomRepository<'_>> {
        OperatingRoomService::new(SqliteOperatingRoomRepository::new(&self.conn))
    }

    pub fn nurses(&self) -> NurseService<SqliteNurseRepository<'_>> {
        NurseService::new(SqliteNurseRepository::new(&self.conn))
    }

    pub fn surgeries(&self) -> SurgeryService<SqliteSurgeryRepository<'_>> {
        SurgeryService::new(SqliteSurgeryRepository::new(&self.conn))
    }

    pub fn schedule(&self) -> SessionScheduleService<'_> {
        ScheduleService::new(
            SqliteNurseRepository::new(&self.conn),
            SqliteSurgeryRepository::new(&self.conn),
            SqliteAssignmentRepository::new(&self.conn),
        )
    }

    /// Adds an OR, defaulting its date to the selected date.
    pub fn add_or(&self, mut new: NewOperatingRoom) -> RepoResult<OperatingRoom> {
        new.date.get_or_insert(self.selected_date);
        self.ors().add_or(new)
    }

    /// Edits an OR from the management page. The OR keeps its date.
    pub fn edit_or(&self, id: OrId, patch: &OperatingRoomPatch) -> RepoResult<OperatingRoom> {
        let patch = OperatingRoomPatch {
            date: None,
            ..patch.clone()
        };
        self.ors().update_or(id, &patch)
    }

    /// Adds a nurse, defaulting the roster date to the selected date.
    pub fn add_nurse(&self, mut new: NewNurse) -> RepoResult<Nurse> {
        new.date.get_or_insert(self.selected_date);
        self.nurses().add_nurse(new)
    }

    /// Edits a nurse from the roster page, moving them onto the selected date.
    pub fn edit_nurse(&self, id: NurseId, patch: &NursePatch) -> RepoResult<Nurse> {
        let patch = NursePatch {
            date: Some(self.selected_date),
            ..patch.clone()
        };
        self.nurses().update_nurse(id, &patch)
    }

    /// Adds a surgery, defaulting its date to the selected date.
    pub fn add_surgery(&self, mut new: NewSurgery) -> RepoResult<Surgery> {
        new.date.get_or_insert(self.selected_date);
        self.surgeries().add_surgery(new)
    }

    pub fn draft(&self) -> &ScheduleDraft {
        &self.draft
    }

    /// Generates with the configured seed, or an entropy-seeded generator.
    pub fn generate_schedule(&mut self) -> Result<&ScheduleDraft, ScheduleError> {
        match self.settings.rng_seed {
            Some(seed) => self.generate_schedule_with(&mut StdRng::seed_from_u64(seed)),
            None => self.generate_schedule_with(&mut rand::thread_rng()),
        }
    }

    /// Generates a new draft and publishes it. On error the previous draft
    /// and shared list are kept.
    pub fn generate_schedule_with<G: Rng + ?Sized>(
        &mut self,
        rng: &mut G,
    ) -> Result<&ScheduleDraft, ScheduleError> {
        let draft = self.schedule().generate(rng, self.settings.slot_hours)?;
        self.draft = draft;
        Ok(&self.draft)
    }

    /// Changes the drafted nurse of one grid slot. Returns entries changed.
    pub fn reassign_nurse(
        &mut self,
        or_number: &str,
        start_time: ClockTime,
        nurse_id: NurseId,
    ) -> usize {
        self.draft.reassign_nurse(or_number, start_time, nurse_id)
    }

    /// Saves the draft as the shared assignment list.
    pub fn finalize_assignments(&self) -> Result<usize, ScheduleError> {
        self.schedule().finalize(&self.draft)
    }

    /// Grid tabs for the active ORs of the selected date.
    pub fn or_groups(&self) -> RepoResult<Vec<OrGroup>> {
        let rooms = self.ors().get_ors_by_date(self.selected_date)?;
        Ok(or_groups(&rooms))
    }

    /// Time grid of the selected date over the given OR columns.
    pub fn time_grid(&self, rooms: &[OperatingRoom]) -> RepoResult<TimeGrid> {
        let surgeries = self.surgeries().get_surgeries_by_date(self.selected_date)?;
        Ok(build_time_grid(
            rooms,
            &surgeries,
            &self.draft,
            self.selected_date,
            self.settings.hour_height_px,
        ))
    }

    /// Unit board over the shared assignment list and the whole nurse roster.
    pub fn unit_board(&self, unit: Unit) -> RepoResult<UnitBoard> {
        let assignments = self.schedule().assignments()?;
        let nurses = self.nurses().list_nurses()?;
        let surgeries = self.surgeries().list_surgeries()?;
        Ok(build_unit_board(unit, &assignments, &nurses, &surgeries))
    }

    /// Nurses of the selected date grouped by shift type.
    pub fn nurse_roster(&self) -> RepoResult<Vec<ShiftGroup>> {
        let nurses = self.nurses().get_nurses_by_date(self.selected_date)?;
        Ok(group_by_shift(&nurses))
    }

    pub fn or_management_page(&self, page: usize) -> RepoResult<OrManagementPage> {
        let rooms = self.ors().list_ors_on(self.selected_date)?;
        Ok(or_management_page(&rooms, page, self.settings.or_page_size))
    }

    /// Month grid with surgery markers. `None` for an invalid month.
    pub fn calendar_month(&self, year: i32, month: u32) -> RepoResult<Option<CalendarMonth>> {
        let surgery_dates: HashSet<NaiveDate> = self
            .surgeries()
            .list_surgeries()?
            .into_iter()
            .map(|surgery| surgery.date)
            .collect();
        Ok(month_view(year, month, self.selected_date, &surgery_dates))
    }
}
