//! Surgery list use-case service.

use crate::model::surgery::{NewSurgery, Surgery, SurgeryId, SurgeryPatch};
use crate::repo::surgery_repo::{SurgeryListQuery, SurgeryRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;

pub struct SurgeryService<R: SurgeryRepository> {
    repo: R,
}

impl<R: SurgeryRepository> SurgeryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a surgery. The OR number is not checked against the OR roster.
    pub fn add_surgery(&self, new: NewSurgery) -> RepoResult<Surgery> {
        let surgery = new.into_record()?;
        self.repo.create_surgery(&surgery)?;
        info!(
            "event=surgery_create module=service status=ok surgery_id={} or_number={}",
            surgery.id, surgery.or_number
        );
        Ok(surgery)
    }

    pub fn update_surgery(&self, id: SurgeryId, patch: &SurgeryPatch) -> RepoResult<Surgery> {
        let mut surgery = self.repo.get_surgery(id)?.ok_or(RepoError::NotFound {
            entity: "surgery",
            id,
        })?;
        surgery.apply_patch(patch);
        self.repo.update_surgery(&surgery)?;
        Ok(surgery)
    }

    pub fn remove_surgery(&self, id: SurgeryId) -> RepoResult<()> {
        self.repo.delete_surgery(id)?;
        info!("event=surgery_delete module=service status=ok surgery_id={id}");
        Ok(())
    }

    pub fn get_surgery(&self, id: SurgeryId) -> RepoResult<Option<Surgery>> {
        self.repo.get_surgery(id)
    }

    pub fn list_surgeries(&self) -> RepoResult<Vec<Surgery>> {
        self.repo.list_surgeries(&SurgeryListQuery::default())
    }

    pub fn get_surgeries_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Surgery>> {
        self.repo.list_surgeries(&SurgeryListQuery {
            date: Some(date),
            ..SurgeryListQuery::default()
        })
    }

    pub fn has_surgeries_on(&self, date: NaiveDate) -> RepoResult<bool> {
        self.repo.has_surgeries_on(date)
    }
}
