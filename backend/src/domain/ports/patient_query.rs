//! Driving port for patient reads.

use async_trait::async_trait;

use crate::domain::{CollectionSummary, Error, Patient, PatientCollection, SortRequest};

/// Domain use-case port for reading patient records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientQuery: Send + Sync {
    /// Every stored record keyed by id.
    async fn list(&self) -> Result<PatientCollection, Error>;

    /// The record stored under `id`, or `not_found`.
    async fn get(&self, id: &str) -> Result<Patient, Error>;

    /// Every record ordered by the requested field.
    ///
    /// Invalid sort literals are rejected before the store is read.
    async fn sorted(&self, request: SortRequest) -> Result<Vec<Patient>, Error>;

    /// Aggregate statistics over the collection.
    async fn summary(&self) -> Result<CollectionSummary, Error>;
}
