//! Stored record layout.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. The document is a JSON object keyed by
//! patient id; each value holds every field except the id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Patient, PatientCollection, PatientDraft, PatientValidationError};

/// Whole stored document.
pub(crate) type PatientDocument = BTreeMap<String, PatientRow>;

/// One stored record.
///
/// `bmi` and `verdict` are written for readers of the raw file but ignored on
/// load; the domain recomputes them from height and weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PatientRow {
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}

impl From<&Patient> for PatientRow {
    fn from(patient: &Patient) -> Self {
        let metrics = patient.metrics();
        Self {
            name: patient.name().to_owned(),
            city: patient.city().to_owned(),
            age: i64::from(patient.age()),
            gender: patient.gender().as_str().to_owned(),
            height: patient.height(),
            weight: patient.weight(),
            bmi: Some(metrics.bmi()),
            verdict: Some(metrics.verdict().as_str().to_owned()),
        }
    }
}

impl PatientRow {
    /// Revalidate the row as the record stored under `id`.
    pub(crate) fn into_patient(self, id: String) -> Result<Patient, PatientValidationError> {
        PatientDraft {
            id,
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        }
        .validate()
    }
}

/// Build the stored document for `patients`.
pub(crate) fn to_document(patients: &PatientCollection) -> PatientDocument {
    patients
        .iter()
        .map(|(id, patient)| (id.as_str().to_owned(), PatientRow::from(patient)))
        .collect()
}
