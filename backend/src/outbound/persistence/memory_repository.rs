//! In-memory adapter for the patient repository port.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::PatientCollection;
use crate::domain::ports::{PatientRepository, PatientRepositoryError};

/// Patient repository holding the collection in process memory.
///
/// Used when the server runs without a data file and in tests. Contents are
/// lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryPatientRepository {
    patients: Mutex<PatientCollection>,
}

impl InMemoryPatientRepository {
    /// Repository pre-populated with `patients`.
    pub fn with_patients(patients: PatientCollection) -> Self {
        Self {
            patients: Mutex::new(patients),
        }
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn load_all(&self) -> Result<PatientCollection, PatientRepositoryError> {
        Ok(self.patients.lock().await.clone())
    }

    async fn save_all(&self, patients: &PatientCollection) -> Result<(), PatientRepositoryError> {
        patients.clone_into(&mut *self.patients.lock().await);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientDraft;

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let patient = PatientDraft {
            id: "P001".to_owned(),
            name: "A".to_owned(),
            city: "X".to_owned(),
            age: 30,
            gender: "female".to_owned(),
            height: 1.6,
            weight: 55.0,
        }
        .validate()
        .expect("valid draft");
        let repo = InMemoryPatientRepository::with_patients(PatientCollection::from([(
            patient.id().clone(),
            patient,
        )]));

        repo.save_all(&PatientCollection::new())
            .await
            .expect("save succeeds");

        assert!(repo.load_all().await.expect("load succeeds").is_empty());
    }
}
