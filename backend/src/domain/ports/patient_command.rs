//! Driving port for patient mutations.
//!
//! Inbound adapters use this port to create, edit, and remove records without
//! touching persistence directly. Implementations validate input before any
//! store access and persist the whole collection after each change.

use async_trait::async_trait;

use crate::domain::{Error, Patient, PatientDraft, PatientPatch};

/// Domain use-case port for changing patient records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientCommand: Send + Sync {
    /// Validate and store a new record.
    ///
    /// Fails with `invalid_request` when the draft breaks a field constraint
    /// and with `conflict` when the id is already taken.
    async fn create(&self, draft: PatientDraft) -> Result<Patient, Error>;

    /// Merge `patch` into the record stored under `id`.
    ///
    /// Fails with `not_found` when no such record exists and with
    /// `invalid_request` when a set field or the merged record is invalid.
    async fn update(&self, id: &str, patch: PatientPatch) -> Result<Patient, Error>;

    /// Remove the record stored under `id`.
    async fn delete(&self, id: &str) -> Result<(), Error>;
}
