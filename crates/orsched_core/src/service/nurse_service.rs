//! Nurse roster use-case service.

use crate::model::nurse::{NewNurse, Nurse, NurseId, NursePatch};
use crate::repo::nurse_repo::{NurseListQuery, NurseRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;

pub struct NurseService<R: NurseRepository> {
    repo: R,
}

impl<R: NurseRepository> NurseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_nurse(&self, new: NewNurse) -> RepoResult<Nurse> {
        let nurse = new.into_record()?;
        self.repo.create_nurse(&nurse)?;
        info!(
            "event=nurse_create module=service status=ok nurse_id={} shift_type={}",
            nurse.id,
            nurse.shift_type.as_str()
        );
        Ok(nurse)
    }

    /// Merges `patch` into the stored nurse.
    pub fn update_nurse(&self, id: NurseId, patch: &NursePatch) -> RepoResult<Nurse> {
        let mut nurse = self.repo.get_nurse(id)?.ok_or(RepoError::NotFound {
            entity: "nurse",
            id,
        })?;
        nurse.apply_patch(patch);
        self.repo.update_nurse(&nurse)?;
        Ok(nurse)
    }

    pub fn delete_nurse(&self, id: NurseId) -> RepoResult<()> {
        self.repo.delete_nurse(id)?;
        info!("event=nurse_delete module=service status=ok nurse_id={id}");
        Ok(())
    }

    pub fn get_nurse(&self, id: NurseId) -> RepoResult<Option<Nurse>> {
        self.repo.get_nurse(id)
    }

    pub fn list_nurses(&self) -> RepoResult<Vec<Nurse>> {
        self.repo.list_nurses(&NurseListQuery::default())
    }

    /// Nurses rostered on `date`. No activity filter applies to nurses.
    pub fn get_nurses_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Nurse>> {
        self.repo.list_nurses(&NurseListQuery {
            date: Some(date),
            ..NurseListQuery::default()
        })
    }
}
