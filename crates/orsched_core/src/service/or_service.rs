//! OR roster use-case service.
//!
//! # Invariants
//! - Updates are shallow merges over the stored record.
//! - Date views used by the assignment grid only include active ORs.

use crate::model::operating_room::{NewOperatingRoom, OperatingRoom, OperatingRoomPatch, OrId};
use crate::repo::or_repo::{OperatingRoomRepository, OrListQuery};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;

pub struct OperatingRoomService<R: OperatingRoomRepository> {
    repo: R,
}

impl<R: OperatingRoomRepository> OperatingRoomService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds an OR and returns the stored record with its generated id.
    pub fn add_or(&self, new: NewOperatingRoom) -> RepoResult<OperatingRoom> {
        let room = new.into_record()?;
        self.repo.create_or(&room)?;
        info!(
            "event=or_create module=service status=ok or_id={} floor={}",
            room.id,
            room.floor.as_str()
        );
        Ok(room)
    }

    /// Merges `patch` into the stored OR.
    pub fn update_or(&self, id: OrId, patch: &OperatingRoomPatch) -> RepoResult<OperatingRoom> {
        let mut room = self.require_or(id)?;
        room.apply_patch(patch);
        self.repo.update_or(&room)?;
        Ok(room)
    }

    /// Flips the active switch of one OR.
    pub fn toggle_or_status(&self, id: OrId) -> RepoResult<OperatingRoom> {
        let current = self.require_or(id)?;
        self.update_or(
            id,
            &OperatingRoomPatch {
                is_active: Some(!current.is_active),
                ..OperatingRoomPatch::default()
            },
        )
    }

    pub fn delete_or(&self, id: OrId) -> RepoResult<()> {
        self.repo.delete_or(id)?;
        info!("event=or_delete module=service status=ok or_id={id}");
        Ok(())
    }

    pub fn get_or(&self, id: OrId) -> RepoResult<Option<OperatingRoom>> {
        self.repo.get_or(id)
    }

    pub fn list_ors(&self) -> RepoResult<Vec<OperatingRoom>> {
        self.repo.list_ors(&OrListQuery::default())
    }

    /// Active ORs booked for `date`, in insertion order.
    pub fn get_ors_by_date(&self, date: NaiveDate) -> RepoResult<Vec<OperatingRoom>> {
        self.repo.list_ors(&OrListQuery {
            date: Some(date),
            active_only: true,
            ..OrListQuery::default()
        })
    }

    /// Every OR on `date`, active or not. Backs the management table.
    pub fn list_ors_on(&self, date: NaiveDate) -> RepoResult<Vec<OperatingRoom>> {
        self.repo.list_ors(&OrListQuery {
            date: Some(date),
            ..OrListQuery::default()
        })
    }

    fn require_or(&self, id: OrId) -> RepoResult<OperatingRoom> {
        self.repo.get_or(id)?.ok_or(RepoError::NotFound {
            entity: "operating room",
            id,
        })
    }
}
