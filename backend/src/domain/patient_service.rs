//! Patient domain service.
//!
//! Implements both patient driving ports over a single whole-collection
//! repository. Every mutation loads the collection, changes it in memory, and
//! saves it back; inputs are validated before the store is read.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    PatientCommand, PatientQuery, PatientRepository, PatientRepositoryError,
};
use crate::domain::{
    CollectionSummary, Error, Patient, PatientCollection, PatientDraft, PatientPatch,
    SortRequest, SortSpec,
};

const NOT_FOUND_MESSAGE: &str = "Patient not found";
const DUPLICATE_MESSAGE: &str = "Patient with this ID already exists";

fn map_repository_error(error: PatientRepositoryError) -> Error {
    error!(%error, "patient repository failed");
    match error {
        PatientRepositoryError::Io { message } => {
            Error::internal(format!("patient store unavailable: {message}"))
        }
        PatientRepositoryError::Serialization { message } => {
            Error::internal(format!("patient store is corrupt: {message}"))
        }
    }
}

/// Patient service implementing the command and query driving ports.
pub struct PatientService<R: ?Sized> {
    patient_repo: Arc<R>,
}

impl<R: ?Sized> Clone for PatientService<R> {
    fn clone(&self) -> Self {
        Self {
            patient_repo: Arc::clone(&self.patient_repo),
        }
    }
}

impl<R: ?Sized> PatientService<R> {
    /// Create a new service over the given repository.
    pub fn new(patient_repo: Arc<R>) -> Self {
        Self { patient_repo }
    }
}

impl<R> PatientService<R>
where
    R: PatientRepository + ?Sized,
{
    async fn load(&self) -> Result<PatientCollection, Error> {
        self.patient_repo
            .load_all()
            .await
            .map_err(map_repository_error)
    }

    async fn save(&self, patients: &PatientCollection) -> Result<(), Error> {
        self.patient_repo
            .save_all(patients)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> PatientCommand for PatientService<R>
where
    R: PatientRepository + ?Sized,
{
    async fn create(&self, draft: PatientDraft) -> Result<Patient, Error> {
        let patient = draft.validate()?;
        let mut patients = self.load().await?;
        if patients.contains_key(patient.id().as_str()) {
            return Err(Error::conflict(DUPLICATE_MESSAGE));
        }

        patients.insert(patient.id().clone(), patient.clone());
        self.save(&patients).await?;
        info!(patient_id = %patient.id(), "patient created");
        Ok(patient)
    }

    async fn update(&self, id: &str, patch: PatientPatch) -> Result<Patient, Error> {
        patch.validate()?;
        let mut patients = self.load().await?;
        let current = patients
            .get(id)
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;

        let metrics_recomputed = patch.changes_measurements();
        let updated = current.apply(patch)?;
        patients.insert(updated.id().clone(), updated.clone());
        self.save(&patients).await?;
        info!(patient_id = %updated.id(), metrics_recomputed, "patient updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let mut patients = self.load().await?;
        if patients.remove(id).is_none() {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }

        self.save(&patients).await?;
        info!(patient_id = id, "patient deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> PatientQuery for PatientService<R>
where
    R: PatientRepository + ?Sized,
{
    async fn list(&self) -> Result<PatientCollection, Error> {
        self.load().await
    }

    async fn get(&self, id: &str) -> Result<Patient, Error> {
        self.load()
            .await?
            .remove(id)
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }

    async fn sorted(&self, request: SortRequest) -> Result<Vec<Patient>, Error> {
        let spec = SortSpec::try_from(&request)?;
        let patients = self.load().await?;
        Ok(spec.apply(patients.into_values().collect()))
    }

    async fn summary(&self) -> Result<CollectionSummary, Error> {
        let patients = self.load().await?;
        Ok(CollectionSummary::from_patients(patients.values()))
    }
}

#[cfg(test)]
#[path = "patient_service_tests.rs"]
mod tests;
